use annotated_app::{Scenario, run};
use serde_json::Value;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/gain.json");

#[test]
fn test_gain_demo() {
    let scenario = Scenario::load(DEMO).unwrap();
    let report = run(scenario);

    // two drag commits settle on 3, the reset button commits 1 and the
    // prompt's 0 reaches the property but not the callback
    assert_eq!(report.callbacks, vec![3.0, 3.0, 1.0]);
    assert!(report.value.abs() < f64::EPSILON);
    assert_eq!(report.properties.get("gain").and_then(Value::as_f64), Some(0.0));
    assert_eq!(report.button, "Reset");
    assert!(!report.prompt_open);

    assert!(report.draw.iter().any(|c| c.contains("\"Gain\"")));
    assert!(report.draw.iter().any(|c| c.contains("\"0.00\"")));
    assert!(report.draw.iter().any(|c| c.contains("\"dB\"")));
    assert!(report.draw.iter().any(|c| c.contains("\"silent\"")));
}

#[test]
fn test_report_serializes() {
    let report = run(Scenario::load(DEMO).unwrap());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(11));
    assert_eq!(json["steps"][4]["committed"], 2);
}
