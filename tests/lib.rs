// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use assembly_line_sim::*;

// Sampling and the throughput model
mod bounded_sampler_tests;



#[test]
fn test_named_quantity_codes_round_trip() {
    for quantity in NamedQuantity::ALL {
        let parsed: NamedQuantity = quantity.code().parse().unwrap();
        assert_eq!(parsed, quantity);
        assert!(!quantity.to_string().is_empty());
    }
    assert!("XXXX".parse::<NamedQuantity>().is_err());
}

#[test]
fn test_experiment_kinds() {
    let numbers: Vec<u8> = ExperimentKind::ALL.iter().map(|k| k.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_error_categories() {
    let err = SimulationError::NoConvergence {
        target: 10,
        iterations: 5,
        last_candidate: 4,
        last_output: 8,
    };
    assert_eq!(err.category(), "Search");
    assert!(err.to_string().contains("No solution found within bounds"));
}
