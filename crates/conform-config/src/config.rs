//! # Configuration Instance
//!
//! A [`Configuration`] owns a top-level schema and the current validated
//! snapshot of the data.
//!
//! ## Lifecycle
//!
//! 1. Created with an empty snapshot.
//! 2. Sources are deep-merged in order (objects merge key-wise, arrays
//!    concatenate, scalars overwrite), then overrides are merged on top.
//! 3. [`Configuration::validate`] replaces the snapshot with the validated,
//!    coerced result. Undeclared top-level keys are dropped.
//!
//! A failed validation discards the snapshot. Every later read returns
//! `None` and every later write fails with [`ConfigError::Invalidated`],
//! including a [`Configuration::set`] whose re-validation failed.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use conform_core::{merge_deep, path};
use conform_schema::{validate, Childs, SchemaNode};

use crate::error::ConfigError;
use crate::guard::View;
use crate::source;

/// Schema-validated configuration data.
#[derive(Debug, Clone)]
pub struct Configuration {
    schema: SchemaNode,
    data: Option<Value>,
}

impl Configuration {
    /// An empty configuration for the given top-level keys.
    pub fn new(schema: Childs) -> Self {
        Self {
            schema: SchemaNode::object(schema),
            data: Some(Value::Object(serde_json::Map::new())),
        }
    }

    /// Read `paths` concurrently, merge them in the given order, merge
    /// `overrides` on top and validate.
    ///
    /// # Errors
    ///
    /// `ConfigError::Load` if any file cannot be read or parsed,
    /// `ConfigError::Validation` if the merged data violates the schema.
    pub async fn load<P: AsRef<Path>>(
        schema: Childs,
        paths: &[P],
        overrides: Value,
    ) -> Result<Self, ConfigError> {
        let sources = source::read_sources(paths).await?;
        debug!(sources = sources.len(), "merging configuration sources");

        let mut config = Self::new(schema);
        config.merge(sources)?;
        if !overrides.is_null() {
            config.override_with(overrides)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Build from already parsed documents, merged in order.
    pub fn from_sources<I>(schema: Childs, sources: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut config = Self::new(schema);
        config.merge(sources)?;
        config.validate()?;
        Ok(config)
    }

    fn merge<I>(&mut self, sources: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Value>,
    {
        let data = self.data.as_mut().ok_or(ConfigError::Invalidated)?;
        for source in sources {
            merge_deep(data, source);
        }
        Ok(())
    }

    /// Merge `data` over the snapshot, e.g. values taken from the
    /// environment. Call [`Configuration::validate`] afterwards.
    pub fn override_with(&mut self, data: Value) -> Result<(), ConfigError> {
        self.merge([data])
    }

    /// Validate the snapshot and replace it with the validated output.
    ///
    /// # Errors
    ///
    /// On failure the snapshot is discarded and the validation error
    /// returned.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let data = self.data.take().ok_or(ConfigError::Invalidated)?;
        match validate(&data, &self.schema) {
            Ok(validated) => {
                self.data = Some(validated);
                Ok(())
            }
            Err(err) => {
                let err = ConfigError::from(err);
                match &err {
                    ConfigError::Validation { details } => {
                        warn!(errors = details.len(), "configuration failed validation")
                    }
                    other => warn!(error = %other, "configuration validation aborted"),
                }
                Err(err)
            }
        }
    }

    /// Read the value at a path expression.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.as_ref().and_then(|data| path::get(data, key))
    }

    /// Write `value` at `key` and re-validate the whole configuration.
    ///
    /// Writes to malformed paths are ignored, but the re-validation still
    /// runs.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalidated` if the snapshot was already discarded;
    /// otherwise any validation error, after which the snapshot is gone.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let data = self.data.as_mut().ok_or(ConfigError::Invalidated)?;
        path::set(data, key, value);
        self.validate()
    }

    /// Write-guarded view of the snapshot.
    pub fn data(&self) -> Option<View<'_>> {
        self.data.as_ref().map(View::new)
    }

    /// Returns `true` until a validation fails.
    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    /// The root object schema wrapping the top-level keys.
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }
}
