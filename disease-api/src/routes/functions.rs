use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        FunctionCall, FunctionKind, FunctionName, FunctionResponse, GetDiseaseArgs, NoArgs,
        SearchDiseasesArgs, UpdateDiseaseSymptomsArgs,
    },
    app_state::AppState,
    domain::models::NewDisease,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/query", post(query))
        .route("/mutation", post(mutation))
}

#[instrument(name = "POST /api/query", skip(app_state))]
async fn query(
    State(app_state): State<AppState>,
    body: Result<Json<FunctionCall>, JsonRejection>,
) -> Result<Json<FunctionResponse>, ApiError> {
    let Json(call) = body?;
    run(&app_state, FunctionKind::Query, call).await
}

#[instrument(name = "POST /api/mutation", skip(app_state))]
async fn mutation(
    State(app_state): State<AppState>,
    body: Result<Json<FunctionCall>, JsonRejection>,
) -> Result<Json<FunctionResponse>, ApiError> {
    let Json(call) = body?;
    run(&app_state, FunctionKind::Mutation, call).await
}

async fn run(
    app_state: &AppState,
    kind: FunctionKind,
    call: FunctionCall,
) -> Result<Json<FunctionResponse>, ApiError> {
    let function = call.resolve(kind)?;
    tracing::debug!(%function, %kind, "Dispatching function call");

    let value = match function {
        FunctionName::AddDisease => {
            let args: NewDisease = call.args()?;
            to_value(app_state.disease_service.add_disease(args).await?)?
        }
        FunctionName::SearchDiseases => {
            let args: SearchDiseasesArgs = call.args()?;
            to_value(app_state.disease_service.search_diseases(&args.query).await?)?
        }
        FunctionName::GetDisease => {
            let args: GetDiseaseArgs = call.args()?;
            to_value(app_state.disease_service.get_disease(&args.id).await?)?
        }
        FunctionName::UpdateDiseaseSymptoms => {
            let args: UpdateDiseaseSymptomsArgs = call.args()?;
            app_state
                .disease_service
                .update_symptoms(&args.id, args.symptoms)
                .await?;
            Value::Null
        }
        FunctionName::BackfillSymptomsText => {
            let _: NoArgs = call.args()?;
            to_value(app_state.migration_service.backfill_symptoms_text().await?)?
        }
        FunctionName::FixMedicines => {
            let _: NoArgs = call.args()?;
            to_value(app_state.migration_service.fix_medicines().await?)?
        }
    };

    Ok(Json(FunctionResponse::success(value)))
}

fn to_value(value: impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| {
        tracing::error!("Failed to serialize function result: {:?}", err);
        ApiError::internal(err.to_string())
    })
}
