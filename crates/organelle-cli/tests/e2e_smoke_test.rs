use std::{fs, path::Path};

use serde_json::Value;
use tempfile::{TempDir, tempdir};

use organelle::OrganelleError;
use organelle_cli::{Args, run};

const ONTOLOGY: &str = "\
format-version: 1.2

[Term]
id: GO:0005576
name: extracellular region
namespace: cellular_component

[Term]
id: GO:0005623
name: cell
namespace: cellular_component
relationship: surrounded_by GO:0005576

[Term]
id: GO:0005829
name: cytosol
namespace: cellular_component
relationship: part_of GO:0005623
";

const REACTION: &str = r#"{
    "reaction": {
        "id": "R-HSA-70171",
        "name": "glucose + ATP => glucose-6-phosphate + ADP",
        "compartments": ["GO:0005829"]
    },
    "participants": [
        {
            "entity": {"id": "e-glc", "name": "glucose"},
            "role": "input",
            "compartments": ["GO:0005829"],
            "shape": "chemical"
        },
        {
            "entity": {"id": "e-atp", "name": "ATP"},
            "role": "input",
            "compartments": ["GO:0005829"],
            "shape": "chemical",
            "trivial": true
        },
        {
            "entity": {"id": "e-g6p", "name": "glucose-6-phosphate"},
            "role": "output",
            "compartments": ["GO:0005829"],
            "shape": "chemical"
        },
        {
            "entity": {"id": "e-hk", "name": "hexokinase"},
            "role": "catalyst",
            "compartments": ["GO:0005829"],
            "shape": "protein",
            "attachments": [{"id": "m1", "label": "P"}]
        }
    ]
}"#;

const CONFIG: &str = "\
[text]
metrics = \"fixed\"
";

fn write_fixtures(dir: &TempDir, ontology: &str) -> Args {
    let path = |name: &str| dir.path().join(name).to_string_lossy().to_string();
    fs::write(dir.path().join("go.obo"), ontology).expect("Failed to write ontology");
    fs::write(dir.path().join("reaction.json"), REACTION).expect("Failed to write reaction");
    fs::write(dir.path().join("config.toml"), CONFIG).expect("Failed to write config");

    Args {
        input: path("reaction.json"),
        ontology: path("go.obo"),
        cross_references: None,
        output: path("layout.json"),
        config: Some(path("config.toml")),
        log_level: "off".to_string(),
    }
}

fn read_layout(path: impl AsRef<Path>) -> Value {
    let json = fs::read_to_string(path).expect("Failed to read layout");
    serde_json::from_str(&json).expect("Layout is not valid JSON")
}

#[test]
fn e2e_smoke_test_writes_layout() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = write_fixtures(&temp_dir, ONTOLOGY);

    run(&args).expect("Failed to lay out reaction");

    let layout = read_layout(&args.output);
    assert_eq!(layout["reaction"]["reaction_id"], "R-HSA-70171");
    assert_eq!(layout["entities"].as_array().map(Vec::len), Some(4));
    assert_eq!(layout["compartments"].as_array().map(Vec::len), Some(3));
}

#[test]
fn e2e_output_is_deterministic() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = write_fixtures(&temp_dir, ONTOLOGY);

    run(&args).expect("First run failed");
    let first = fs::read_to_string(&args.output).expect("Failed to read layout");

    args.output = temp_dir
        .path()
        .join("second.json")
        .to_string_lossy()
        .to_string();
    run(&args).expect("Second run failed");
    let second = fs::read_to_string(&args.output).expect("Failed to read layout");

    assert_eq!(first, second);
}

#[test]
fn e2e_missing_ontology_degrades_to_root_only() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = write_fixtures(&temp_dir, ONTOLOGY);
    args.ontology = temp_dir
        .path()
        .join("absent.obo")
        .to_string_lossy()
        .to_string();

    run(&args).expect("Lenient mode should tolerate a missing ontology");
    assert!(Path::new(&args.output).exists());
}

#[test]
fn e2e_strict_mode_rejects_broken_ontology() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = write_fixtures(&temp_dir, "[Term]\nid: GO:1\nthis is not a tag\n");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[ontology]\nstrict = true\n\n[text]\nmetrics = \"fixed\"\n",
    )
    .expect("Failed to write config");

    let err = run(&args).expect_err("Strict mode should reject the ontology");
    assert!(err.to_string().contains("line 3"));
    assert!(!Path::new(&args.output).exists());
}

#[test]
fn e2e_malformed_reaction_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = write_fixtures(&temp_dir, ONTOLOGY);
    fs::write(&args.input, "{\"participants\": []}").expect("Failed to write reaction");

    let err = run(&args).unwrap_err();
    assert!(matches!(err, OrganelleError::Input(_)), "{err}");
    assert!(err.to_string().contains("reaction"));
}
