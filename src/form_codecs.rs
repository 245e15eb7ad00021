//! Deserializers for calculator inputs. The same fields arrive from urlencoded HTML forms, where
//! everything is a string, and from JSON, where they may be numbers, bools or null.

use std::fmt;

use serde::{de, de::Visitor, Deserializer};

struct DecimalStringVisitor;

impl<'de> Visitor<'de> for DecimalStringVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, or a string of a decimal number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalStringVisitor)
    }
}

/// Keeps numeric fields as text so validation can tell missing, empty and malformed apart.
pub fn optional_decimal_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalStringVisitor)
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = Option<bool>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a bool, or a checkbox value such as \"true\" or \"on\"")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v.trim().to_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(Some(true)),
            "false" | "off" | "0" | "no" | "" => Ok(Some(false)),
            _ => Err(de::Error::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlagVisitor)
    }
}

pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "optional_decimal_string")]
        amount: Option<String>,
        #[serde(default, deserialize_with = "optional_flag")]
        flag: Option<bool>,
    }

    #[test]
    fn decimal_from_number_test() {
        let test_struct: TestStruct = serde_json::from_str(r#"{"amount": 32.5}"#).unwrap();
        assert_eq!(test_struct.amount, Some("32.5".to_string()));

        let test_struct: TestStruct = serde_json::from_str(r#"{"amount": 32}"#).unwrap();
        assert_eq!(test_struct.amount, Some("32".to_string()));
    }

    #[test]
    fn decimal_from_string_test() {
        let test_struct: TestStruct = serde_json::from_str(r#"{"amount": "0.5"}"#).unwrap();
        assert_eq!(test_struct.amount, Some("0.5".to_string()));
    }

    #[test]
    fn missing_and_null_test() {
        let test_struct: TestStruct = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(
            test_struct,
            TestStruct {
                amount: None,
                flag: None,
            }
        );
    }

    #[test]
    fn flag_from_bool_and_string_test() {
        let test_struct: TestStruct = serde_json::from_str(r#"{"flag": true}"#).unwrap();
        assert_eq!(test_struct.flag, Some(true));

        let test_struct: TestStruct = serde_json::from_str(r#"{"flag": "on"}"#).unwrap();
        assert_eq!(test_struct.flag, Some(true));

        let test_struct: TestStruct = serde_json::from_str(r#"{"flag": "false"}"#).unwrap();
        assert_eq!(test_struct.flag, Some(false));
    }

    #[test]
    fn flag_rejects_garbage_test() {
        let result = serde_json::from_str::<TestStruct>(r#"{"flag": "maybe"}"#);
        assert!(result.is_err());
    }
}
