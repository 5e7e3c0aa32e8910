use crate::constants::PARAMETER_SIGIL;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::query_annotator::extract_parameters;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A value a caller may supply for a query parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FromStr for Value {
    type Err = std::convert::Infallible;

    /// Booleans, then integers, then finite reals; anything else is text,
    /// including `nan` and `inf`.
    fn from_str(s: &str) -> std::result::Result<Value, Self::Err> {
        if let Ok(b) = s.parse::<bool>() {
            return Ok(Value::Bool(b));
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Value::Integer(i));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Real(f)),
            _ => Ok(Value::Text(s.to_string())),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Real(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

/// Query text together with the parameters it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    parameters: BTreeSet<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Query> {
        let text = text.into();
        let parameters = extract_parameters(&text)?;
        Ok(Query { text, parameters })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parameter names, without the sigil
    pub fn parameters(&self) -> &BTreeSet<String> {
        &self.parameters
    }

    /// Check that the arguments cover exactly the query's parameters.
    /// Argument names may be given with or without the leading `$`.
    /// Nothing is bound or escaped here.
    pub fn check_arguments(&self, arguments: &HashMap<String, Value>) -> Result<()> {
        let given: BTreeSet<&str> = arguments
            .keys()
            .map(|name| name.strip_prefix(PARAMETER_SIGIL).unwrap_or(name.as_str()))
            .collect();
        if let Some(missing) = self
            .parameters
            .iter()
            .find(|p| !given.contains(&p.as_str()))
        {
            return Err(Error::new(
                ErrorKind::MissingArgument,
                format!("No argument for parameter {}{}", PARAMETER_SIGIL, missing),
            ));
        }
        if let Some(unexpected) = given.iter().find(|g| !self.parameters.contains(**g)) {
            return Err(Error::new(
                ErrorKind::UnexpectedArgument,
                format!(
                    "Argument {} does not match any parameter of query {}",
                    unexpected, self.text
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
