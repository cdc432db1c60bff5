use std::io::Write;
use wordfinder::config::{AppConfig, ConfigManager};
use wordfinder::engines::generation::{Alphabet, FitnessPolicy, MutationPolicy};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "wordfinder.toml",
        r#"
[simulation]
target = "to be or not to be"
population_size = 150
mutation_rate = 0.02
fitness = "closeness"
alphabet = "abcdefghijklmnopqrstuvwxyz "
max_generations = 400

[simulation.mutation]
kind = "drift"
max_offset = 4

[sweep]
min_population = 20
max_population = 60
output = "grid.csv"
delimiter = ","
"#,
    );

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.simulation.target, "to be or not to be");
    assert_eq!(config.simulation.population_size, 150);
    assert_eq!(config.simulation.mutation_rate, 0.02);
    assert_eq!(config.simulation.fitness, FitnessPolicy::Closeness);
    assert_eq!(config.simulation.mutation, MutationPolicy::Drift { max_offset: 4 });
    assert_eq!(config.simulation.alphabet.len(), 27);
    assert_eq!(config.simulation.max_generations, Some(400));
    assert_eq!(config.sweep.min_population, 20);
    assert_eq!(config.sweep.max_population, 60);
    assert_eq!(config.sweep.delimiter, ',');
    // Unset fields keep their defaults
    assert_eq!(config.sweep.population_step, 5);
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "wordfinder.json",
        r#"{ "simulation": { "target": "unicorn", "population_size": 40, "fitness": "linear" } }"#,
    );

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.simulation.target, "unicorn");
    assert_eq!(config.simulation.population_size, 40);
    assert_eq!(config.simulation.fitness, FitnessPolicy::Linear);
    assert_eq!(config.simulation.alphabet, Alphabet::printable_ascii());
}

#[test]
fn test_invalid_file_rejected_and_previous_config_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.toml",
        "[simulation]\ntarget = \"ok\"\nmutation_rate = 3.0\n",
    );

    let manager = ConfigManager::new();
    assert!(manager.load_from_file(&path).is_err());
    assert_eq!(manager.get().simulation.mutation_rate, 0.05);

    assert!(manager.load_from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "wordfinder.toml", "[sweep]\niterations = 2\n");

    std::env::set_var("WORDFINDER__SWEEP__ITERATIONS", "7");
    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    std::env::remove_var("WORDFINDER__SWEEP__ITERATIONS");

    result.unwrap();
    assert_eq!(manager.get().sweep.iterations, 7);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let manager = ConfigManager::new();
    manager
        .update(|c| {
            c.simulation.target = "hello world".to_string();
            c.simulation.mutation = MutationPolicy::Drift { max_offset: 2 };
            c.sweep.seed = Some(12);
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    let config: AppConfig = reloaded.get();

    assert_eq!(config.simulation.target, "hello world");
    assert_eq!(config.simulation.mutation, MutationPolicy::Drift { max_offset: 2 });
    assert_eq!(config.sweep.seed, Some(12));
}
