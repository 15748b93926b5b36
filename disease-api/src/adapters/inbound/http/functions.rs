//! Wire types of the function-call protocol.
//!
//! Clients call a named function with a JSON argument object and receive a
//! tagged envelope back. Dispatch to the services happens in
//! `crate::routes::functions`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::domain::{models::DiseaseId, DiseaseError};

/// Whether a function may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FunctionKind {
    #[strum(serialize = "query")]
    Query,
    #[strum(serialize = "mutation")]
    Mutation,
}

/// Every function the gateway can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum FunctionName {
    AddDisease,
    SearchDiseases,
    GetDisease,
    UpdateDiseaseSymptoms,
    BackfillSymptomsText,
    FixMedicines,
}

impl FunctionName {
    pub fn kind(self) -> FunctionKind {
        match self {
            Self::SearchDiseases | Self::GetDisease => FunctionKind::Query,
            Self::AddDisease
            | Self::UpdateDiseaseSymptoms
            | Self::BackfillSymptomsText
            | Self::FixMedicines => FunctionKind::Mutation,
        }
    }
}

/// Request body of `POST /api/query` and `POST /api/mutation`.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    /// Function path, optionally prefixed by its module: `diseases:searchDiseases`.
    pub path: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(Default::default())
}

impl FunctionCall {
    /// Resolve the function named after the last `:` of the path.
    pub fn function(&self) -> Result<FunctionName, DiseaseError> {
        let name = self.path.rsplit(':').next().unwrap_or_default();

        name.parse()
            .map_err(|_| DiseaseError::UnknownFunction(self.path.clone()))
    }

    /// Resolve the function and check it may run as `kind`.
    ///
    /// Queries may run through the mutation endpoint, never the reverse.
    pub fn resolve(&self, kind: FunctionKind) -> Result<FunctionName, DiseaseError> {
        let function = self.function()?;

        if kind == FunctionKind::Query && function.kind() == FunctionKind::Mutation {
            return Err(DiseaseError::QueryCannotMutate(function.to_string()));
        }

        Ok(function)
    }

    /// Decode the argument object into the function's argument type.
    pub fn args<T: DeserializeOwned>(&self) -> Result<T, DiseaseError> {
        serde_json::from_value(self.args.clone())
            .map_err(|err| DiseaseError::Validation(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchDiseasesArgs {
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetDiseaseArgs {
    pub id: DiseaseId,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDiseaseSymptomsArgs {
    pub id: DiseaseId,
    pub symptoms: Vec<String>,
}

/// Success envelope: `{"status": "success", "value": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename = "success")]
pub struct FunctionResponse {
    pub value: Value,
}

impl FunctionResponse {
    pub fn success(value: Value) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewDisease;
    use serde_json::json;

    fn call(path: &str, args: Value) -> FunctionCall {
        FunctionCall {
            path: path.to_string(),
            args,
        }
    }

    #[test]
    fn function_names_are_camel_case() {
        assert_eq!(
            "searchDiseases".parse::<FunctionName>().unwrap(),
            FunctionName::SearchDiseases
        );
        assert_eq!(FunctionName::BackfillSymptomsText.to_string(), "backfillSymptomsText");
        assert!("SearchDiseases".parse::<FunctionName>().is_err());
    }

    #[test]
    fn path_selects_function_after_last_colon() {
        assert_eq!(
            call("diseases:searchDiseases", json!({})).function().unwrap(),
            FunctionName::SearchDiseases
        );
        assert_eq!(
            call("migrations/fixMedicines:fixMedicines", json!({}))
                .function()
                .unwrap(),
            FunctionName::FixMedicines
        );
        assert_eq!(
            call("addDisease", json!({})).function().unwrap(),
            FunctionName::AddDisease
        );
    }

    #[test]
    fn unknown_function_keeps_full_path() {
        let err = call("diseases:dropAll", json!({})).function().unwrap_err();
        assert!(matches!(err, DiseaseError::UnknownFunction(path) if path == "diseases:dropAll"));
    }

    #[test]
    fn queries_cannot_run_mutations() {
        let err = call("diseases:addDisease", json!({}))
            .resolve(FunctionKind::Query)
            .unwrap_err();
        assert!(matches!(err, DiseaseError::QueryCannotMutate(name) if name == "addDisease"));
    }

    #[test]
    fn mutations_can_run_queries() {
        assert_eq!(
            call("diseases:getDisease", json!({"id": 1}))
                .resolve(FunctionKind::Mutation)
                .unwrap(),
            FunctionName::GetDisease
        );
    }

    #[test]
    fn args_default_to_empty_object() {
        let call: FunctionCall =
            serde_json::from_value(json!({"path": "fixMedicines"})).unwrap();

        assert_eq!(call.args, json!({}));
        assert!(call.args::<NoArgs>().is_ok());
    }

    #[test]
    fn args_decoding_errors_are_validation_errors() {
        let missing = call("searchDiseases", json!({})).args::<SearchDiseasesArgs>();
        assert!(matches!(missing, Err(DiseaseError::Validation(_))));

        let mistyped = call("getDisease", json!({"id": "seven"})).args::<GetDiseaseArgs>();
        assert!(matches!(mistyped, Err(DiseaseError::Validation(_))));

        let extra = call("fixMedicines", json!({"dryRun": true})).args::<NoArgs>();
        assert!(matches!(extra, Err(DiseaseError::Validation(_))));
    }

    #[test]
    fn add_disease_args_decode_into_new_disease() {
        let args = call(
            "addDisease",
            json!({
                "name": "Flu",
                "category": "Viral",
                "description": "Influenza",
                "symptoms": ["fever", "cough"],
                "advice": "Rest",
                "medicines": [{
                    "name": "Paracetamol",
                    "dosage": "500mg",
                    "frequency": "Every 6 hours",
                    "duration": "3 days"
                }]
            }),
        )
        .args::<NewDisease>()
        .unwrap();

        assert_eq!(args.symptoms, vec!["fever".to_string(), "cough".to_string()]);
        assert_eq!(args.medicines.len(), 1);
    }

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(FunctionResponse::success(json!({"fixed": 2}))).unwrap();
        assert_eq!(body, json!({"status": "success", "value": {"fixed": 2}}));
    }
}
