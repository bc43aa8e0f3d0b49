use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use medknn_core::{
    blend_with_match_ratio, encode_symptoms, Error, KnnClassifier, ModelHandle,
};
use serde::{Deserialize, Serialize};

/// Symptom names offered to the UI picker
pub const COMMON_SYMPTOMS: [&str; 32] = [
    "Fever", "Cough", "Headache", "Fatigue", "Nausea", "Vomiting",
    "Diarrhea", "Abdominal Pain", "Chest Pain", "Shortness of Breath",
    "Dizziness", "Muscle Pain", "Joint Pain", "Sore Throat", "Runny Nose",
    "Skin Rash", "Itching", "Swelling", "Weight Loss", "Weight Gain",
    "Loss of Appetite", "Difficulty Sleeping", "Back Pain", "Neck Pain",
    "Eye Pain", "Blurred Vision", "Hearing Loss", "Ear Pain",
    "Frequent Urination", "Blood in Urine", "Constipation", "Bloating",
];

const MODEL_TYPE: &str = "Custom KNN (exact brute-force)";

#[derive(Deserialize)]
struct PredictRequest {
    symptoms: Option<Vec<String>>,
    // accepted in any shape for API compatibility; only logged
    #[serde(default)]
    age: Option<serde_json::Value>,
    #[serde(default)]
    gender: Option<serde_json::Value>,
}

const DEFAULT_AGE: &str = "30";
const DEFAULT_GENDER: &str = "unknown";

fn describe(value: Option<&serde_json::Value>, default: &str) -> String {
    match value {
        None | Some(serde_json::Value::Null) => default.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PredictResponse {
    pub disease: String,
    pub confidence: f64,
    pub matched_symptoms: Vec<String>,
    pub symptom_count: usize,
    pub matched_count: usize,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    model_type: &'static str,
    symptoms_count: usize,
    diseases_count: usize,
}

#[derive(Serialize)]
struct SymptomsResponse {
    symptoms: &'static [&'static str],
    total_symptoms_in_model: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(handle: ModelHandle, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(handle.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register the prediction routes on an app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/predict", web::post().to(predict))
        .route("/health", web::get().to(health))
        .route("/symptoms", web::get().to(symptoms));
}

/// Malformed bodies get the same `{"error": ...}` shape as every other failure
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = serde_json::json!({
        "error": format!("Invalid request body: {}", err)
    });
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

async fn predict(
    handle: web::Data<ModelHandle>,
    req: web::Json<PredictRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    let symptoms = match req.symptoms {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "No symptoms provided"
            })))
        }
    };

    let Some(model) = handle.current() else {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Model not loaded"
        })));
    };

    tracing::debug!(
        supplied = symptoms.len(),
        age = %describe(req.age.as_ref(), DEFAULT_AGE),
        gender = %describe(req.gender.as_ref(), DEFAULT_GENDER),
        "predict request"
    );

    let outcome = web::block(move || run_prediction(&model, &symptoms)).await?;

    match outcome {
        Ok(response) => {
            tracing::info!(
                disease = %response.disease,
                confidence = response.confidence,
                matched = response.matched_count,
                "prediction served"
            );
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            tracing::error!(error = %e, "prediction failed");
            Ok(error_response(&e))
        }
    }
}

fn run_prediction(model: &KnnClassifier, symptoms: &[String]) -> medknn_core::Result<PredictResponse> {
    let encoding = encode_symptoms(symptoms, model.columns()?);
    let prediction = model.predict_one(&encoding.vector)?;
    let confidence =
        blend_with_match_ratio(prediction.confidence, encoding.matched_count(), symptoms.len());

    Ok(PredictResponse {
        disease: prediction.label,
        confidence,
        matched_count: encoding.matched_count(),
        symptom_count: symptoms.len(),
        matched_symptoms: encoding.matched,
    })
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({
        "error": format!("Prediction failed: {}", e)
    });
    match e {
        Error::NotFitted => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn health(handle: web::Data<ModelHandle>) -> ActixResult<HttpResponse> {
    let model = handle.current();
    let response = HealthResponse {
        status: "healthy",
        model_loaded: model.is_some(),
        model_type: MODEL_TYPE,
        symptoms_count: model
            .as_ref()
            .and_then(|m| m.columns().ok())
            .map_or(0, |c| c.len()),
        diseases_count: model.as_ref().map_or(0, |m| m.n_labels()),
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn symptoms(handle: web::Data<ModelHandle>) -> ActixResult<HttpResponse> {
    let total = handle
        .current()
        .and_then(|m| m.columns().ok().map(|c| c.len()))
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(SymptomsResponse {
        symptoms: &COMMON_SYMPTOMS,
        total_symptoms_in_model: total,
    }))
}
