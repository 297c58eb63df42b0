//! Collects key/value pairs from literal, file and env sources.

use std::collections::HashSet;
use std::path::Path;

use crate::framework::{GenerateError, Loader};
use crate::model::KvPairSources;

const MAX_KEY_LENGTH: usize = 253;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KvPair {
    pub key: String,
    pub value: Vec<u8>,
}

/// Gathers every pair from `sources`: env files first, then literals, then files.
///
/// Keys are validated and must be unique across all sources.
pub(crate) fn collect_pairs(
    loader: &dyn Loader,
    sources: &KvPairSources,
) -> Result<Vec<KvPair>, GenerateError> {
    let mut pairs = Vec::new();
    for file in sources.env_files() {
        pairs.extend(pairs_from_env_file(loader, file)?);
    }
    for literal in &sources.literal_sources {
        pairs.push(pair_from_literal(literal)?);
    }
    for file in &sources.file_sources {
        pairs.push(pair_from_file(loader, file)?);
    }

    let mut seen = HashSet::new();
    for pair in &pairs {
        validate_key(&pair.key)?;
        if !seen.insert(pair.key.as_str()) {
            return Err(GenerateError::DuplicateKey {
                key: pair.key.clone(),
            });
        }
    }
    Ok(pairs)
}

fn pair_from_literal(literal: &str) -> Result<KvPair, GenerateError> {
    let invalid = || GenerateError::InvalidLiteral {
        literal: literal.to_string(),
    };
    let (key, value) = literal.split_once('=').ok_or_else(invalid)?;
    if key.is_empty() {
        return Err(invalid());
    }
    Ok(KvPair {
        key: key.to_string(),
        value: strip_quotes(value).as_bytes().to_vec(),
    })
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn pair_from_file(loader: &dyn Loader, source: &str) -> Result<KvPair, GenerateError> {
    let invalid = || GenerateError::InvalidFileSource {
        file: source.to_string(),
    };
    let (key, path) = match source.split_once('=') {
        Some((key, path)) if !key.is_empty() && !path.is_empty() => (key.to_string(), path),
        Some(_) => return Err(invalid()),
        None => {
            let key = Path::new(source)
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(invalid)?;
            (key.to_string(), source)
        }
    };
    let value = loader.load(path)?;
    Ok(KvPair { key, value })
}

fn pairs_from_env_file(loader: &dyn Loader, file: &str) -> Result<Vec<KvPair>, GenerateError> {
    let content = loader.load(file)?;
    let text = String::from_utf8_lossy(&content);
    let mut pairs = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(GenerateError::InvalidEnvLine {
                file: file.to_string(),
                line: index + 1,
                text: raw.to_string(),
            });
        };
        pairs.push(KvPair {
            key: key.to_string(),
            value: value.as_bytes().to_vec(),
        });
    }
    Ok(pairs)
}

fn validate_key(key: &str) -> Result<(), GenerateError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockLoader;

    fn keys(pairs: &[KvPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_literals_strip_matching_quotes() {
        assert_eq!(pair_from_literal("a=\"x y\"").unwrap().value, b"x y");
        assert_eq!(pair_from_literal("a='x'").unwrap().value, b"x");
        assert_eq!(pair_from_literal("a=\"x'").unwrap().value, b"\"x'");
        assert_eq!(pair_from_literal("a=b=c").unwrap().value, b"b=c");
        assert_eq!(pair_from_literal("a=").unwrap().value, b"");
        assert!(matches!(
            pair_from_literal("novalue"),
            Err(GenerateError::InvalidLiteral { .. })
        ));
        assert!(pair_from_literal("=x").is_err());
    }

    #[test]
    fn test_sources_are_collected_in_order() {
        let mut loader = MockLoader::new();
        loader
            .expect_load("app.env")
            .return_ok("# comment\n\nMODE=prod\n  PORT=8080\n");
        loader.expect_load("conf/app.ini").return_ok("[main]\n");
        loader.expect_load("raw.bin").return_ok(vec![0xffu8, 0x00]);

        let sources = KvPairSources {
            literal_sources: vec!["greeting=hello".into()],
            file_sources: vec!["conf/app.ini".into(), "blob=raw.bin".into()],
            env_source: Some("app.env".into()),
            ..Default::default()
        };
        let pairs = collect_pairs(&loader, &sources).unwrap();
        assert_eq!(keys(&pairs), vec!["MODE", "PORT", "greeting", "app.ini", "blob"]);
        assert_eq!(pairs[1].value, b"8080");
        assert_eq!(pairs[4].value, vec![0xffu8, 0x00]);
        loader.verify();
    }

    #[test]
    fn test_env_line_without_separator_is_rejected() {
        let mut loader = MockLoader::new();
        loader.expect_load("bad.env").return_ok("A=1\nJUSTKEY\n");
        let sources = KvPairSources {
            env_sources: vec!["bad.env".into()],
            ..Default::default()
        };
        let err = collect_pairs(&loader, &sources).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidEnvLine { line: 2, .. }));
    }

    #[test]
    fn test_env_key_with_trailing_space_is_invalid() {
        let mut loader = MockLoader::new();
        loader.expect_load("spaced.env").return_ok("PORT = 8080\n");
        let sources = KvPairSources {
            env_sources: vec!["spaced.env".into()],
            ..Default::default()
        };
        assert!(matches!(
            collect_pairs(&loader, &sources),
            Err(GenerateError::InvalidKey { key }) if key == "PORT "
        ));
    }

    #[test]
    fn test_duplicate_and_invalid_keys() {
        let loader = MockLoader::new();
        let duplicate = KvPairSources {
            literal_sources: vec!["a=1".into(), "a=2".into()],
            ..Default::default()
        };
        assert!(matches!(
            collect_pairs(&loader, &duplicate),
            Err(GenerateError::DuplicateKey { key }) if key == "a"
        ));

        let invalid = KvPairSources {
            literal_sources: vec!["bad key=1".into()],
            ..Default::default()
        };
        assert!(matches!(
            collect_pairs(&loader, &invalid),
            Err(GenerateError::InvalidKey { .. })
        ));
        assert!(validate_key("..").is_err());
        assert!(validate_key("tls.crt").is_ok());
    }

    #[test]
    fn test_file_source_load_failure_propagates() {
        let mut loader = MockLoader::new();
        loader.expect_load("missing.txt").return_not_found();
        let sources = KvPairSources {
            file_sources: vec!["missing.txt".into()],
            ..Default::default()
        };
        assert!(matches!(
            collect_pairs(&loader, &sources),
            Err(GenerateError::Load(_))
        ));
        assert!(matches!(
            pair_from_file(&loader, "key="),
            Err(GenerateError::InvalidFileSource { .. })
        ));
    }
}
