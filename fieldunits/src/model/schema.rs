use std::sync::Arc;

use crate::config::{ModelConfig, Settings};
use crate::unit_type::UnitType;

use super::FieldType;

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldSpec<T> {
    name: String,
    ty: T,
    required: bool,
}

impl<T> FieldSpec<T> {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type.
    pub fn ty(&self) -> &T {
        &self.ty
    }

    /// `false` for fields declared with [`SchemaBuilder::optional_field`].
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered set of typed fields plus model behaviour.
///
/// Built once and shared by every model instance through an [`Arc`].
#[derive(Debug)]
pub struct Schema<T: FieldType = UnitType> {
    name: String,
    fields: Vec<FieldSpec<T>>,
    config: ModelConfig,
}

impl<T: FieldType> Schema<T> {
    /// Starts a schema called `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder<T> {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            config: ModelConfig::default(),
        }
    }

    /// Schema name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    /// Model behaviour.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Position of `name` among the declared fields.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Declared field called `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSpec<T>> {
        self.index_of(name).map(|i| &self.fields[i])
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder<T: FieldType = UnitType> {
    name: String,
    fields: Vec<FieldSpec<T>>,
    config: ModelConfig,
}

impl<T: FieldType> SchemaBuilder<T> {
    /// Declares a required field. Redeclaring a name replaces the earlier
    /// declaration in place.
    pub fn field(self, name: impl Into<String>, ty: T) -> Self {
        self.push(name.into(), ty, true)
    }

    /// Declares a field that may be left out.
    pub fn optional_field(self, name: impl Into<String>, ty: T) -> Self {
        self.push(name.into(), ty, false)
    }

    /// Sets model behaviour.
    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Takes model behaviour from loaded settings.
    pub fn settings(self, settings: &Settings) -> Self {
        self.config(settings.model)
    }

    /// Finishes the schema.
    pub fn build(self) -> Arc<Schema<T>> {
        Arc::new(Schema {
            name: self.name,
            fields: self.fields,
            config: self.config,
        })
    }

    fn push(mut self, name: String, ty: T, required: bool) -> Self {
        let spec = FieldSpec { name, ty, required };
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }
}
