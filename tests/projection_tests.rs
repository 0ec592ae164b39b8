// tests/projection_tests.rs

use num_complex::Complex;
use regdm::{
    project, project_amplitudes, validate_density_matrix, DensityMatrix, DmError, Projector,
    ProjectorConfig, QubitLoc, Register, StateVector,
};
use std::f64::consts::FRAC_1_SQRT_2;

const TEST_TOLERANCE: f64 = 1e-10;

fn c(re: f64, im: f64) -> Complex<f64> {
    Complex::new(re, im)
}

// Helper asserting a projected matrix matches expected real rows
fn check_matrix(rho: &DensityMatrix, expected: &[&[f64]], context: &str) {
    assert_eq!(rho.dim(), expected.len(), "Dimension mismatch - {}", context);
    for (i, row) in expected.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            let diff = (rho.get(i, j) - c(val, 0.0)).norm();
            assert!(
                diff < TEST_TOLERANCE,
                "Mismatch at ({}, {}) - Actual: {}, Expected: {}, Context: {}",
                i, j, rho.get(i, j), val, context
            );
        }
    }
}

#[test]
fn test_project_zero_state() -> Result<(), DmError> {
    let rho = project(&StateVector::from_real(&[1.0, 0.0])?);
    check_matrix(&rho, &[&[1.0, 0.0], &[0.0, 0.0]], "|0>");
    Ok(())
}

#[test]
fn test_project_one_state() -> Result<(), DmError> {
    let rho = project(&StateVector::from_real(&[0.0, 1.0])?);
    check_matrix(&rho, &[&[0.0, 0.0], &[0.0, 1.0]], "|1>");
    Ok(())
}

#[test]
fn test_project_plus_state() -> Result<(), DmError> {
    let rho = project(&StateVector::from_real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2])?);
    check_matrix(&rho, &[&[0.5, 0.5], &[0.5, 0.5]], "|+>");
    Ok(())
}

#[test]
fn test_length_three_is_invalid_dimension() {
    assert_eq!(
        StateVector::from_real(&[1.0, 0.0, 0.0]),
        Err(DmError::InvalidDimension { len: 3 })
    );
    let amps = [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
    assert_eq!(project_amplitudes(&amps), Err(DmError::InvalidDimension { len: 3 }));
}

#[test]
fn test_zero_qubit_projection() -> Result<(), DmError> {
    let rho = project_amplitudes(&[c(0.0, 1.0)])?;
    assert_eq!(rho.dim(), 1);
    assert_eq!(rho.num_qubits(), 0);
    assert!((rho.get(0, 0) - c(1.0, 0.0)).norm() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_random_states_hermitian_with_unit_trace() -> Result<(), DmError> {
    for n in 1..=4 {
        for seed in 0..5 {
            let state = Register::random_state(n, seed)?.state(0)?;
            let rho = project(&state);
            assert!(rho.is_hermitian(TEST_TOLERANCE), "n={} seed={} not Hermitian", n, seed);
            assert!(rho.conj_transpose().approx_eq(&rho, TEST_TOLERANCE));
            assert!((rho.trace().re - state.norm_sqr()).abs() < TEST_TOLERANCE);
            assert!(rho.trace().im.abs() < TEST_TOLERANCE);
            assert!((rho.purity() - 1.0).abs() < 1e-9);
            validate_density_matrix(&rho)?;
        }
    }
    Ok(())
}

#[test]
fn test_trace_equals_squared_norm_for_unnormalized_input() -> Result<(), DmError> {
    let state = StateVector::new(vec![c(1.0, 1.0), c(0.0, 2.0)])?;
    let rho = project(&state);
    assert!((rho.trace().re - 6.0).abs() < TEST_TOLERANCE);
    assert!(rho.is_hermitian(TEST_TOLERANCE));
    Ok(())
}

#[test]
fn test_register_projection_matches_free_function() -> Result<(), DmError> {
    let reg = Register::random_state(3, 99)?;
    let via_projector = Projector::new().project_register(&reg)?;
    let direct = project(&reg.state(0)?);
    assert!(via_projector.approx_eq(&direct, TEST_TOLERANCE));
    Ok(())
}

#[test]
fn test_batched_register_rejected_for_single_projection() -> Result<(), DmError> {
    let reg = Register::random_batch(2, 3, 5)?;
    assert_eq!(
        Projector::new().project_register(&reg),
        Err(DmError::BatchSize { batch: 3 })
    );

    let all = Projector::new().project_batch(&reg)?;
    assert_eq!(all.len(), 3);
    for (b, rho) in all.iter().enumerate() {
        assert!(rho.approx_eq(&project(&reg.state(b)?), TEST_TOLERANCE));
    }
    Ok(())
}

#[test]
fn test_reduced_bell_pair_is_maximally_mixed() -> Result<(), DmError> {
    let projector = Projector::new();
    for loc in [QubitLoc(0), QubitLoc(1)] {
        let mut bell = Register::ghz_state(2)?;
        bell.focus(&[loc])?;
        let rho = projector.project_register(&bell)?;
        check_matrix(&rho, &[&[0.5, 0.0], &[0.0, 0.5]], "Bell half");
    }
    Ok(())
}

#[test]
fn test_reduced_product_state_keeps_factor() -> Result<(), DmError> {
    // q1 = |+>, q2 = |1>, q3 = |0>; amplitude at index i = <q3 q2 q1 | psi>
    let mut amps = vec![c(0.0, 0.0); 8];
    amps[0b010] = c(FRAC_1_SQRT_2, 0.0);
    amps[0b011] = c(FRAC_1_SQRT_2, 0.0);
    let mut reg = Register::new(3, amps)?;

    let projector = Projector::new();

    reg.focus(&[QubitLoc(0)])?;
    check_matrix(&projector.project_register(&reg)?, &[&[0.5, 0.5], &[0.5, 0.5]], "q1");

    reg.focus(&[QubitLoc(1)])?;
    check_matrix(&projector.project_register(&reg)?, &[&[0.0, 0.0], &[0.0, 1.0]], "q2");

    reg.focus(&[QubitLoc(2)])?;
    check_matrix(&projector.project_register(&reg)?, &[&[1.0, 0.0], &[0.0, 0.0]], "q3");
    Ok(())
}

#[test]
fn test_focus_order_permutes_reduced_basis() -> Result<(), DmError> {
    // |q1=1, q2=0, q3=0>: index 1
    let mut reg = Register::product_state(&[true, false, false])?;
    let projector = Projector::new();

    // Active order (q1, q2): q1 is bit 0 -> reduced index 1
    reg.focus(&[QubitLoc(0), QubitLoc(1)])?;
    let rho = projector.project_register(&reg)?;
    assert!((rho.get(1, 1).re - 1.0).abs() < TEST_TOLERANCE);

    // Active order (q2, q1): q1 is now bit 1 -> reduced index 2
    reg.focus(&[QubitLoc(1), QubitLoc(0)])?;
    let rho = projector.project_register(&reg)?;
    assert!((rho.get(2, 2).re - 1.0).abs() < TEST_TOLERANCE);
    assert!(rho.get(1, 1).norm() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_reduced_random_state_is_valid_density_matrix() -> Result<(), DmError> {
    let mut reg = Register::random_state(4, 2024)?;
    reg.focus(&[QubitLoc(3), QubitLoc(1)])?;
    let projector = Projector::with_config(
        ProjectorConfig::default()
            .with_input_validation(true)
            .with_output_validation(true),
    );
    let rho = projector.project_register(&reg)?;
    assert_eq!(rho.dim(), 4);
    assert!(rho.purity() <= 1.0 + 1e-9);
    validate_density_matrix(&rho)?;
    Ok(())
}

#[test]
fn test_input_validation_rejects_unnormalized_register() -> Result<(), DmError> {
    let reg = Register::new(1, vec![c(1.0, 0.0), c(1.0, 0.0)])?;
    let strict = Projector::with_config(ProjectorConfig::default().with_input_validation(true));
    assert!(matches!(strict.project_register(&reg), Err(DmError::Incoherence { .. })));

    let loose = Projector::with_config(
        ProjectorConfig::default()
            .with_input_validation(true)
            .with_tolerance(2.0),
    );
    assert!(loose.project_register(&reg).is_ok());
    Ok(())
}
