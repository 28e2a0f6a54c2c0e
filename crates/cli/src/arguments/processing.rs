use toolpipe_core::error::Error::ParameterFormat;
use toolpipe_core::error::Result;
use toolpipe_core::execution::Encoding;
use toolpipe_core::options::{CliOption, OptionSpec};

/// Parse one call-site option, `name` or `name=value`.
///
/// The name is normalized later, when the option becomes a token.
///
/// # Errors
///
/// Returns [`ParameterFormat`] if the option has an empty name, e.g. `=x`.
pub fn parse_option(raw: &str) -> Result<CliOption> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (raw, None),
    };

    if name.trim().is_empty() {
        return Err(ParameterFormat(raw.to_string()));
    }

    Ok(match value {
        Some(value) => CliOption::valued(name, value),
        None => CliOption::flag(name),
    })
}

/// # Errors
///
/// See [`parse_option`].
pub fn parse_option_spec(raw_options: &[String]) -> Result<OptionSpec> {
    raw_options.iter().map(|raw| parse_option(raw)).collect()
}

/// Looks up the `--encoding` label, lossy when `--lossy` was given.
///
/// # Errors
///
/// Returns an unknown encoding error for labels `encoding_rs` does not know.
pub fn resolve_encoding(label: &str, lossy: bool) -> Result<Encoding> {
    let encoding = Encoding::for_label(label)?;
    Ok(if lossy { encoding.lossy() } else { encoding })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolpipe_core::error::Error;

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("no-limit").unwrap(), CliOption::flag("no-limit"));
        assert_eq!(
            parse_option("header=PICK ONE").unwrap(),
            CliOption::valued("header", "PICK ONE")
        );
        assert_eq!(
            parse_option("--height=5").unwrap(),
            CliOption::valued("--height", "5")
        );
        assert_eq!(parse_option("empty=").unwrap(), CliOption::valued("empty", ""));
    }

    #[test]
    fn test_parse_option_empty_name() {
        for bad in ["=x", "", " =x", "="] {
            let result = parse_option(bad);
            assert!(
                matches!(result, Err(Error::ParameterFormat(ref p)) if p == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_option_spec_tokens() {
        let spec = parse_option_spec(&[
            "m".to_string(),
            "header=PICK ONE".to_string(),
            "+x".to_string(),
        ])
        .unwrap();
        assert_eq!(spec.to_tokens(), vec!["-m", "--header='PICK ONE'", "+x"]);
    }

    #[test]
    fn test_parse_option_spec_stops_at_bad_option() {
        let result = parse_option_spec(&["m".to_string(), "=x".to_string()]);
        assert!(matches!(result, Err(Error::ParameterFormat(p)) if p == "=x"));
    }

    #[test]
    fn test_resolve_encoding() {
        let encoding = resolve_encoding("latin1", false).unwrap();
        assert_eq!(encoding.name(), "windows-1252");
        assert!(!encoding.is_lossy());

        assert!(resolve_encoding("utf-8", true).unwrap().is_lossy());
        assert!(matches!(
            resolve_encoding("nope", false),
            Err(Error::UnknownEncoding(_))
        ));
    }
}
