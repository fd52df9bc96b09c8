//! Simple, general-purpose, hierarchical configuration.
//!
//! Configuration *value*s are referred to using a *path* of *name*s (slice of
//! strings), each of which walks a level down the hierarchy of *section*s.  For
//! example, `&["webserver", "server", "port"]`.
//!
//! Configuration paths are case-insensitive.
//!
//! A [`Config`] implementation may or may not allow a value and a section to
//! exist at the same path.
//!
//! All configuration values are strings; [`ValueRef`]s turn them into typed
//! values.

pub mod parse;
pub mod validate;

pub trait ValueParser<T>: std::fmt::Debug {
    fn parse(&self, value: &str) -> Result<T, String>;
}

pub trait ValueValidator<T>: std::fmt::Debug {
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Everything needed to read a configuration value.
#[derive(Clone, Debug)]
pub struct ValueRef<'a, T> {
    /// Path to read the value from.
    pub names: &'a [&'a str],
    /// Default to use when there is no value at the path.
    pub def: &'a str,
    pub type_: &'a dyn ValueParser<T>,
    pub validators: &'a [&'a dyn ValueValidator<T>],
}

/// Read configuration values.
pub trait Config {
    /// Find the value at the path given by `names`, if any.
    fn find(&self, names: &[&str]) -> Option<&str>;

    /// Get the value at the path given by `names`, or the default `def`.
    fn get<'s>(&'s self, names: &[&str], def: &'s str) -> &'s str {
        self.find(names).unwrap_or(def)
    }
}

/// Get a value using a [reference](ValueRef).
///
/// Errors name the path of the offending value.
pub fn get_ref<C, T>(config: &C, vref: &ValueRef<T>) -> Result<T, String>
where
    C: Config + ?Sized,
{
    let path = vref.names.join(".");
    let raw = config.get(vref.names, vref.def);
    let parsed = vref.type_.parse(raw)
        .map_err(|e| format!("config value {path}: {e}"))?;
    for val in vref.validators {
        val.validate(&parsed)
            .map_err(|e| format!("config value {path}: {e}"))?;
    }
    Ok(parsed)
}

/// Implementation of [`Config`] using an in-memory map.
///
/// A value and a section may not exist at the same path.
///
/// When multiple values have equivalent paths (because paths are
/// case-insensitive), reading the value at the path will always return the same
/// value, but there is no defined scheme for how this value is chosen.
pub mod map {
    use std::collections::HashMap;

    /// A value or a section.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Entry {
        Value(String),
        Section(HashMap<String, Entry>),
    }

    impl Entry {
        fn find(&self, names: &[&str]) -> Option<&str> {
            match names.split_first() {
                Some((first_name, other_names)) => match self {
                    Entry::Value(_) => None,
                    Entry::Section(section) => section
                        .get(&first_name.to_ascii_lowercase())
                        .and_then(|entry| entry.find(other_names)),
                },
                None => match self {
                    Entry::Value(value) => Some(value.as_str()),
                    Entry::Section(_) => None,
                },
            }
        }
    }

    /// Implementation of [`Config`](super::Config) using an in-memory map.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        cfg: Entry,
    }

    impl super::Config for Config {
        fn find(&self, names: &[&str]) -> Option<&str> {
            self.cfg.find(names)
        }
    }

    /// Copy an entry and lowercase its keys.
    fn normalise(entry: &Entry) -> Entry {
        match entry {
            Entry::Value(v) => Entry::Value(v.to_owned()),
            Entry::Section(m) => {
                let m: HashMap<String, Entry> = m.iter()
                    .map(|(k, v)| (k.to_lowercase(), normalise(v)))
                    .collect();
                Entry::Section(m)
            }
        }
    }

    /// Construct a config from a hierarchical map.
    pub fn new(cfg: HashMap<String, Entry>) -> Config {
        Config { cfg: normalise(&Entry::Section(cfg)) }
    }

    /// Construct a config from `(dotted.path, value)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let mut root = HashMap::new();
        for (path, value) in pairs {
            let names: Vec<&str> = path.split('.').collect();
            insert(&mut root, &names, value);
        }
        new(root)
    }

    fn insert(section: &mut HashMap<String, Entry>, names: &[&str], value: &str) {
        if let Some((first, rest)) = names.split_first() {
            if rest.is_empty() {
                section.insert(first.to_string(), Entry::Value(value.to_owned()));
            } else {
                let entry = section.entry(first.to_string())
                    .or_insert_with(|| Entry::Section(HashMap::new()));
                if let Entry::Value(_) = entry {
                    *entry = Entry::Section(HashMap::new());
                }
                if let Entry::Section(child) = entry {
                    insert(child, rest, value);
                }
            }
        }
    }
}

/// Implementation of [`Config`] using the process's environment variables.
///
/// - The configuration values become fixed at the time of construction.
/// - If reading an environment variable fails, it is ignored.
/// - Path names are separated using `_` characters.
/// - Only uppercase environment variables are included.
/// - A value and a section may exist at the same path.
/// - When reading a value, `-` characters in path names will match `_`
///   characters in environment variable names.
pub mod env {
    use std::collections::HashMap;

    /// Implementation of [`Config`](super::Config) using the process's
    /// environment variables.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        prefix: String,
        env: HashMap<String, String>,
    }

    impl super::Config for Config {
        fn find(&self, names: &[&str]) -> Option<&str> {
            let mapped_names: Vec<String> = names.iter().map(|name| {
                name.to_ascii_uppercase().replace('-', "_")
            }).collect();
            let env_name = self.prefix.to_owned() + &mapped_names.join("_");
            self.env.get(&env_name).map(String::as_str)
        }
    }

    /// Construct a config from the current process environment.
    ///
    /// Only environment variables starting with `prefix` are included, and
    /// `prefix` is removed when reading values.
    pub fn new(prefix: &str) -> Config {
        let mut env = HashMap::new();
        for (name_os, val_os) in std::env::vars_os() {
            if let (Ok(name), Ok(val)) =
                (name_os.into_string(), val_os.into_string())
            {
                if name.starts_with(prefix) {
                    env.insert(name, val);
                }
            }
        }
        Config { prefix: prefix.to_owned(), env }
    }
}

/// Implementation of [`Config`] using a YAML file.
///
/// A value and a section may not exist at the same path.
///
/// When multiple values have equivalent paths (because paths are
/// case-insensitive), the last matching value in the file is returned.
pub mod file {
    use std::{fs::File, path::Path};
    use super::map::{self, Entry};
    use serde_yaml::Value;

    fn parse(value: &Value) -> Entry {
        match value {
            Value::Null => Entry::Value("".to_owned()),
            Value::Bool(b) => Entry::Value(b.to_string()),
            Value::Number(n) => Entry::Value(n.to_string()),
            Value::String(s) => Entry::Value(s.to_owned()),
            Value::Sequence(s) => {
                Entry::Section(s.iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), parse(v)))
                    .collect())
            }
            Value::Mapping(m) => {
                Entry::Section(m.iter()
                    .flat_map(|(k, v)| {
                        k.as_str()
                            .map(|k_str| (k_str.to_owned(), parse(v)))
                    })
                    .collect())
            }
            Value::Tagged(_) => Entry::Value("".to_owned())
        }
    }

    /// Construct a config from YAML text.
    pub fn from_str(text: &str) -> Result<map::Config, String> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| format!("error loading config: {e}"))?;
        from_value(&value)
    }

    /// Construct a config from a YAML file.
    pub fn new<P>(path: P) -> Result<map::Config, String>
    where
        P: AsRef<Path> + core::fmt::Debug
    {
        let file = File::open(path.as_ref())
            .map_err(|e| format!("error opening file ({path:?}): {e}"))?;
        let value: Value = serde_yaml::from_reader(file)
            .map_err(|e| format!(
                "error loading config from file ({path:?}): {e}"))?;
        from_value(&value)
    }

    fn from_value(value: &Value) -> Result<map::Config, String> {
        match value {
            // an empty document
            Value::Null => Ok(map::new(Default::default())),
            Value::Mapping(_) => match parse(value) {
                Entry::Section(e) => Ok(map::new(e)),
                Entry::Value(_) => Ok(map::new(Default::default())),
            },
            _ => Err("invalid config file: top-level must be a map".to_owned()),
        }
    }
}

/// Implementation of [`Config`] reading from several configs in turn.
///
/// The first config with a value at a path wins.
pub mod layered {
    /// Implementation of [`Config`](super::Config) over a list of configs.
    pub struct Config {
        layers: Vec<Box<dyn super::Config + Send + Sync>>,
    }

    impl super::Config for Config {
        fn find(&self, names: &[&str]) -> Option<&str> {
            self.layers.iter().find_map(|layer| layer.find(names))
        }
    }

    /// Construct a config from layers, highest priority first.
    pub fn new(layers: Vec<Box<dyn super::Config + Send + Sync>>) -> Config {
        Config { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORT: ValueRef<'_, u16> = ValueRef {
        names: &["webserver", "server", "port"],
        def: "26300",
        type_: &parse::WEB_PORT,
        validators: &[],
    };

    const ROOT: ValueRef<'_, String> = ValueRef {
        names: &["webserver", "server", "root-path"],
        def: "/",
        type_: &parse::STRING,
        validators: &[validate::WEB_PATH],
    };

    #[test]
    fn map_lookup_is_case_insensitive() {
        let cfg = map::from_pairs(&[("Webserver.Server.Port", "8080")]);
        assert_eq!(get_ref(&cfg, &PORT), Ok(8080));
    }

    #[test]
    fn missing_value_uses_default() {
        let cfg = map::from_pairs(&[]);
        assert_eq!(get_ref(&cfg, &PORT), Ok(26300));
        assert_eq!(get_ref(&cfg, &ROOT), Ok("/".to_owned()));
    }

    #[test]
    fn section_is_not_a_value() {
        let cfg = map::from_pairs(&[("webserver.server.port.x", "1")]);
        assert_eq!(cfg.find(&["webserver", "server", "port"]), None);
    }

    #[test]
    fn errors_name_the_path() {
        let cfg = map::from_pairs(&[("webserver.server.root-path", "api")]);
        let err = get_ref(&cfg, &ROOT).unwrap_err();
        assert!(err.contains("webserver.server.root-path"), "{err}");
    }

    #[test]
    fn yaml_numbers_and_bools_become_strings() {
        let cfg = file::from_str(
            "webserver:\n  server:\n    port: 9000\n    all-interfaces: false\n",
        ).unwrap();
        assert_eq!(get_ref(&cfg, &PORT), Ok(9000));
        assert_eq!(cfg.find(&["webserver", "server", "all-interfaces"]),
                   Some("false"));
    }

    #[test]
    fn yaml_top_level_must_be_map() {
        assert!(file::from_str("- 1\n- 2\n").is_err());
        assert!(file::from_str("just a string\n").is_err());
    }

    #[test]
    fn yaml_empty_document_is_empty_config() {
        let cfg = file::from_str("~\n").unwrap();
        assert_eq!(cfg.find(&["webserver", "server", "port"]), None);
    }

    #[test]
    fn layered_prefers_earlier_layers() {
        let layers: Vec<Box<dyn Config + Send + Sync>> = vec![
            Box::new(map::from_pairs(&[("a.b", "first")])),
            Box::new(map::from_pairs(&[("a.b", "second"), ("a.c", "other")])),
        ];
        let cfg = layered::new(layers);
        assert_eq!(cfg.find(&["a", "b"]), Some("first"));
        assert_eq!(cfg.find(&["a", "c"]), Some("other"));
        assert_eq!(cfg.get(&["a", "d"], "def"), "def");
    }
}
