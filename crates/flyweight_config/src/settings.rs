use crate::errors::Error;
use core::fmt::Display;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A typed setting value. Textual form is `<type>:<value>`:
///
///   b:true
///   i:-123
///   u:234
///   s:hello world
///   m:foo,bar,baz
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Setting {
    SInt(isize),
    UInt(usize),
    String(String),
    Bool(bool),
    Map(Vec<String>),
}

impl Setting {
    #[must_use]
    pub fn as_bool(&self) -> bool {
        if !matches!(self, Self::Bool(_)) {
            warn!("setting is not a boolean");
        }

        match self {
            Self::Bool(value) => *value,
            Self::SInt(value) => *value != 0,
            Self::UInt(value) => *value != 0,
            Self::String(value) => is_bool_value(value),
            Self::Map(values) => !values.is_empty(),
        }
    }

    #[must_use]
    pub fn as_sint(&self) -> isize {
        if !matches!(self, Self::SInt(_)) {
            warn!("setting is not a signed integer");
        }

        match self {
            Self::SInt(value) => *value,
            Self::UInt(value) => isize::try_from(*value).unwrap_or(isize::MAX),
            Self::Bool(value) => isize::from(*value),
            Self::String(value) => value.parse().unwrap_or(0),
            Self::Map(values) => isize::try_from(values.len()).unwrap_or(isize::MAX),
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> usize {
        if !matches!(self, Self::UInt(_)) {
            warn!("setting is not an unsigned integer");
        }

        match self {
            Self::UInt(value) => *value,
            Self::SInt(value) => usize::try_from(*value).unwrap_or(0),
            Self::Bool(value) => usize::from(*value),
            Self::String(value) => value.parse().unwrap_or(0),
            Self::Map(values) => values.len(),
        }
    }

    /// Returns the value without its type prefix
    #[must_use]
    pub fn as_string(&self) -> String {
        if !matches!(self, Self::String(_)) {
            warn!("setting is not a string");
        }

        match self {
            Self::SInt(value) => value.to_string(),
            Self::UInt(value) => value.to_string(),
            Self::String(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Map(values) => values.join(","),
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Vec<String> {
        if !matches!(self, Self::Map(_)) {
            warn!("setting is not a map");
        }

        match self {
            Self::Map(values) => values.clone(),
            other => vec![other.as_string()],
        }
    }
}

fn parse_error(value: &str, err: impl Display) -> Error {
    Error::Config(format!("error parsing {value}: {err}"))
}

fn is_bool_value(s: &str) -> bool {
    ["YES", "ON", "TRUE", "1"]
        .iter()
        .any(|v| v.eq_ignore_ascii_case(s))
}

impl Serialize for Setting {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value)
            .map_err(|err| serde::de::Error::custom(format!("cannot deserialize: {err}")))
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SInt(value) => write!(f, "i:{value}"),
            Self::UInt(value) => write!(f, "u:{value}"),
            Self::String(value) => write!(f, "s:{value}"),
            Self::Bool(value) => write!(f, "b:{value}"),
            Self::Map(values) => write!(f, "m:{}", values.join(",")),
        }
    }
}

impl FromStr for Setting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((key_type, key_value)) = s.split_once(':') else {
            return Err(Error::Config(format!("setting has no type prefix: {s}")));
        };

        let setting = match key_type {
            "b" => Self::Bool(key_value.parse::<bool>().map_err(|e| parse_error(key_value, e))?),
            "i" => Self::SInt(key_value.parse::<isize>().map_err(|e| parse_error(key_value, e))?),
            "u" => Self::UInt(key_value.parse::<usize>().map_err(|e| parse_error(key_value, e))?),
            "s" => Self::String(key_value.to_string()),
            "m" => Self::Map(
                key_value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => return Err(Error::Config(format!("unknown setting type: {key_type}"))),
        };

        Ok(setting)
    }
}

/// `SettingInfo` describes a known setting
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SettingInfo {
    /// Name of the key in dot notation (ie: canvas.width)
    pub key: String,
    /// Description of the setting
    pub description: String,
    /// Default value when nothing has been stored
    pub default: Setting,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn setting() {
        let s = Setting::from_str("b:true").unwrap();
        assert_eq!(s, Setting::Bool(true));
        assert!(s.as_bool());
        assert_eq!(1, s.as_sint());
        assert_eq!(1, s.as_uint());
        assert_eq!("true", s.as_string());
        assert_eq!(vec!["true"], s.as_map());

        let s = Setting::from_str("i:-1").unwrap();
        assert_eq!(s, Setting::SInt(-1));
        assert!(s.as_bool());
        assert_eq!(-1, s.as_sint());
        assert_eq!(0, s.as_uint());
        assert_eq!("-1", s.as_string());

        let s = Setting::from_str("s:hello world").unwrap();
        assert_eq!(s, Setting::String("hello world".into()));
        assert!(!s.as_bool());
        assert_eq!(0, s.as_uint());
        assert_eq!("hello world", s.as_string());

        let s = Setting::from_str("m:oval_filled, line").unwrap();
        assert_eq!(s, Setting::Map(vec!["oval_filled".into(), "line".into()]));
        assert_eq!(2, s.as_uint());
        assert_eq!("oval_filled,line", s.as_string());

        assert_eq!(Setting::from_str("m:").unwrap(), Setting::Map(vec![]));

        let s = Setting::from_str("s:on").unwrap();
        assert!(s.as_bool());
    }

    #[test]
    fn invalid() {
        for input in ["notexist:true", "b:foobar", "i:foobar", "u:-1", "no prefix"] {
            assert!(
                matches!(Setting::from_str(input), Err(Error::Config(_))),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn display_keeps_prefix() {
        assert_eq!(Setting::UInt(5).to_string(), "u:5");
        assert_eq!(
            Setting::Map(vec!["a".into(), "b".into()]).to_string(),
            "m:a,b"
        );

        let json = serde_json::to_string(&Setting::Bool(false)).unwrap();
        assert_eq!(json, r#""b:false""#);
        let back: Setting = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Setting::Bool(false));
    }
}
