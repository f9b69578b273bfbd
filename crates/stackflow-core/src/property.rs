//! Resource property maps and deferred input assembly

use crate::output::{Output, OutputError};
use serde::Serialize;
use serde_json::Value;

/// Resolved resource properties keyed by their wire name
pub type PropertyMap = serde_json::Map<String, Value>;

/// Anything that can be turned into a deferred JSON property value
pub trait IntoPropertyValue {
    fn into_property_value(self) -> Output<Value>;
}

impl<T> IntoPropertyValue for Output<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    fn into_property_value(self) -> Output<Value> {
        self.apply(serde_json::to_value)
    }
}

impl<T> IntoPropertyValue for Vec<T>
where
    T: IntoPropertyValue,
{
    fn into_property_value(self) -> Output<Value> {
        Output::all(self.into_iter().map(IntoPropertyValue::into_property_value))
            .map(Value::Array)
    }
}

impl IntoPropertyValue for Inputs {
    fn into_property_value(self) -> Output<Value> {
        self.into_output().map(Value::Object)
    }
}

/// Ordered builder of resource inputs, some of which may still be pending
///
/// The assembled map resolves only once every entry has resolved, which is how
/// a resource waits on the resources it references.
#[derive(Default)]
pub struct Inputs {
    entries: Vec<(String, Output<Value>)>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl IntoPropertyValue) -> Self {
        self.entries.push((key.into(), value.into_property_value()));
        self
    }

    /// Like [`Inputs::set`], leaving the key out entirely when `value` is `None`
    pub fn set_optional<V>(self, key: impl Into<String>, value: Option<V>) -> Self
    where
        V: IntoPropertyValue,
    {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Set a literal JSON value
    pub fn set_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.push((key.into(), Output::new(value)));
        self
    }

    pub fn into_output(self) -> Output<PropertyMap> {
        let (keys, values): (Vec<String>, Vec<Output<Value>>) = self.entries.into_iter().unzip();
        Output::all(values).map(move |values| keys.into_iter().zip(values).collect())
    }
}

/// Look up `key` in a resolved property map
pub fn get_property(props: &PropertyMap, key: &str) -> Result<Value, OutputError> {
    props
        .get(key)
        .cloned()
        .ok_or_else(|| OutputError::MissingProperty(key.to_string()))
}
