// Integration tests for medknn
use medknn_core::{
    blend_with_match_ratio, encode_symptoms, Error, FeatureVector, KnnClassifier,
    SymptomColumns, TrainingTable, CONFIDENCE_CAP,
};
use medknn_storage::{load_training_table, DatasetConfig, ModelManager, ModelStore};
use std::fs;
use std::sync::Arc;

const DATASET: &str = "diseases,fever,cough,headache,skin rash,abdominal pain\n\
                       flu,1,1,1,0,0\n\
                       flu,1,1,0,0,0\n\
                       flu,1,0,1,0,0\n\
                       migraine,0,0,1,0,0\n\
                       migraine,0,0,1,0,0\n\
                       dermatitis,0,0,0,1,0\n\
                       gastritis,0,0,0,0,1\n\
                       gastritis,1,0,0,0,1\n";

fn columns(names: &[&str]) -> SymptomColumns {
    SymptomColumns::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
}

#[test]
fn test_worked_example() {
    let table = TrainingTable::from_rows(
        columns(&["Fever", "Cough"]),
        vec![
            (FeatureVector::new(vec![1.0, 0.0]), "A"),
            (FeatureVector::new(vec![1.0, 0.0]), "A"),
            (FeatureVector::new(vec![0.0, 1.0]), "B"),
        ],
    )
    .unwrap();
    let model = KnnClassifier::new(2).unwrap().fit(table).unwrap();

    let predictions = model.predict(&[FeatureVector::new(vec![1.0, 0.0])]).unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].label, "A");
    assert_eq!(predictions[0].confidence, CONFIDENCE_CAP);
}

#[test]
fn test_encoder_worked_example() {
    let encoding = encode_symptoms(&["fev"], &columns(&["Fever", "Cough"]));
    assert_eq!(encoding.vector.as_slice(), &[1.0, 0.0]);
    assert_eq!(encoding.matched, vec!["Fever".to_string()]);
}

#[test]
fn test_csv_to_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, DATASET).unwrap();

    let table = load_training_table(&path, &DatasetConfig::default()).unwrap();
    let columns = table.columns().clone();
    let model = KnnClassifier::new(3).unwrap().fit(table).unwrap();

    let symptoms = ["Fever", "COUGH", "runny nose"];
    let encoding = encode_symptoms(&symptoms, &columns);
    assert_eq!(encoding.matched, vec!["fever".to_string(), "cough".to_string()]);

    let prediction = model.predict_one(&encoding.vector).unwrap();
    assert_eq!(prediction.label, "flu");

    let adjusted =
        blend_with_match_ratio(prediction.confidence, encoding.matched_count(), symptoms.len());
    assert!(adjusted < prediction.confidence);
    assert!((0.0..=CONFIDENCE_CAP).contains(&adjusted));
}

#[test]
fn test_store_round_trip_is_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, DATASET).unwrap();

    let table = load_training_table(&path, &DatasetConfig::default()).unwrap();
    let model = KnnClassifier::new(4).unwrap().fit(table).unwrap();

    let store = ModelStore::new(dir.path().join("model"));
    store.save(&model).unwrap();
    let restored = store.load().unwrap();

    let queries: Vec<FeatureVector> = (0..32u32)
        .map(|bits| {
            let flags: Vec<bool> = (0..5).map(|i| bits & (1 << i) != 0).collect();
            FeatureVector::from_bits(&flags)
        })
        .collect();

    let a = model.predict(&queries).unwrap();
    let b = restored.predict(&queries).unwrap();
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.label, y.label);
        assert_eq!(x.confidence.to_bits(), y.confidence.to_bits());
    }
}

#[test]
fn test_manager_serves_shared_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, DATASET).unwrap();

    let manager = ModelManager::new(
        ModelStore::new(dir.path().join("model")),
        &path,
        DatasetConfig::default(),
        3,
    )
    .unwrap();
    let handle = manager.handle();
    manager.load_or_train().unwrap();

    let model = handle.current().unwrap();
    let query = encode_symptoms(&["headache"], model.columns().unwrap()).vector;

    let threads: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            let query = query.clone();
            std::thread::spawn(move || model.predict_one(&query).unwrap())
        })
        .collect();

    let results: Vec<_> = threads.into_iter().map(|t| t.join().unwrap()).collect();
    assert!(results.iter().all(|p| p == &results[0]));
    assert_eq!(results[0].label, "migraine");
}

#[test]
fn test_query_against_wrong_vocabulary() {
    let table = TrainingTable::from_rows(
        columns(&["Fever", "Cough"]),
        vec![(FeatureVector::new(vec![1.0, 0.0]), "A")],
    )
    .unwrap();
    let model = KnnClassifier::new(1).unwrap().fit(table).unwrap();

    let other = columns(&["Fever", "Cough", "Rash"]);
    let encoding = encode_symptoms(&["fever"], &other);
    assert!(matches!(
        model.predict_one(&encoding.vector),
        Err(Error::ShapeMismatch { expected: 2, actual: 3 })
    ));
}

#[test]
fn test_columns_artifact_matches_dataset_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, DATASET).unwrap();

    let table = load_training_table(&path, &DatasetConfig::default()).unwrap();
    let model = KnnClassifier::new(1).unwrap().fit(table).unwrap();
    let store = ModelStore::new(dir.path());
    store.save(&model).unwrap();

    let raw = fs::read_to_string(store.columns_path()).unwrap();
    let names: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        names,
        vec!["fever", "cough", "headache", "skin rash", "abdominal pain"]
    );
}
