use std::sync::Arc;

use questionnaire_spec::{LocaleCatalog, StepSchema};

use crate::controller::WizardController;
use crate::error::WizardError;

/// A validated schema and a catalog complete for it, shared read-only.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    schema: Arc<StepSchema>,
    catalog: Arc<LocaleCatalog>,
}

impl Questionnaire {
    /// Pairs `schema` with `catalog`, rejecting catalogs that miss any key the schema renders.
    pub fn new(schema: StepSchema, catalog: LocaleCatalog) -> Result<Self, WizardError> {
        catalog.check(&schema)?;
        Ok(Self {
            schema: Arc::new(schema),
            catalog: Arc::new(catalog),
        })
    }

    /// The built-in microcement questionnaire with its embedded catalogs.
    pub fn microcement() -> Result<Self, WizardError> {
        let schema = StepSchema::microcement();
        let catalog = LocaleCatalog::builtin(&schema)?;
        Self::new(schema, catalog)
    }

    pub fn schema(&self) -> &StepSchema {
        &self.schema
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// A fresh controller for one session.
    pub fn controller(&self) -> WizardController {
        WizardController::new(self.schema.clone(), self.catalog.clone())
    }
}
