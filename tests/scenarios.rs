//! End-to-end runs of the solver on small systems with known answers.

use approx::assert_relative_eq;
use linsys::*;

fn fr(s: &str) -> Fraction {
    s.parse().unwrap()
}

fn ints(lines: &[&[i64]]) -> Matrix<Fraction> {
    Matrix::from_list(
        lines
            .iter()
            .map(|l| l.iter().map(|&x| Fraction::from(x)).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn unique_solution() {
    let a = ints(&[&[1, -2, 1], &[0, 2, -8], &[5, 0, -5]]);
    let b = Vector::from_list(vec![fr("1"), fr("0"), fr("-1")]);

    let solution = find_solutions_for(&a, &b).unwrap().unwrap();
    assert_eq!(
        solution.clone().into_vec(),
        vec![Some(fr("-2/5")), Some(fr("-4/5")), Some(fr("-1/5"))]
    );
    assert_eq!(solution.to_string(), "[-2/5, -4/5, -1/5]");

    let x: Vector<Fraction> = solution.iter().flatten().cloned().collect();
    assert_eq!((&a * &x).unwrap(), b);
}

#[test]
fn unique_solution_float() {
    let sys = matrix![[1.0, -2.0, 1.0, 1.0], [0.0, 2.0, -8.0, 0.0], [5.0, 0.0, -5.0, -1.0]]
        .unwrap();
    let solution = find_solutions(&sys).unwrap().unwrap();
    let expected = [-0.4, -0.8, -0.2];
    for (x, e) in solution.iter().zip(expected) {
        assert_relative_eq!(x.unwrap(), e, epsilon = 1e-12);
    }
}

#[test]
fn dependent_column_leaves_free_unknowns() {
    // Column 1 is twice column 0 and row 2 is the sum of rows 0 and 1.
    let sys = ints(&[&[1, 2, 0, 1, 1], &[0, 0, 1, 2, 2], &[1, 2, 1, 3, 3]]);
    let solution = find_solutions(&sys).unwrap().unwrap();

    assert_eq!(
        solution.clone().into_vec(),
        vec![Some(fr("1")), None, Some(fr("2")), None]
    );
    assert_eq!(solution.to_string(), "[1, None, 2, None]");

    // Free unknowns at zero give a particular solution.
    let x: Vector<Fraction> = solution
        .iter()
        .map(|s| s.clone().unwrap_or_else(|| fr("0")))
        .collect();
    let a = ints(&[&[1, 2, 0, 1], &[0, 0, 1, 2], &[1, 2, 1, 3]]);
    assert_eq!((&a * &x).unwrap(), Vector::from_list(vec![fr("1"), fr("2"), fr("3")]));
}

#[test]
fn inverse_2x2() {
    let a = ints(&[&[5, 1], &[3, -2]]);
    let det = a.det().unwrap();
    assert_eq!(det, fr("-13"));

    let expected = &ints(&[&[-2, -1], &[-3, 5]]) * (fr("1") / det);
    assert_eq!(inverse(&a).unwrap(), Some(expected));
}

#[test]
fn tiny_and_huge_systems() {
    let a = matrix![[1e-6, 0.0], [0.0, 1e-6]].unwrap();
    let inv = inverse(&a).unwrap().unwrap();
    assert_relative_eq!(inv[(0, 0)], 1e6, max_relative = 1e-12);
    assert_relative_eq!(inv[(1, 1)], 1e6, max_relative = 1e-12);

    let sys = matrix![[1e-11, 0.0, 1e-11], [0.0, 1e-11, 1e-11]].unwrap();
    assert_eq!(find_solutions(&sys).unwrap().unwrap().into_vec(), vec![Some(1.0), Some(1.0)]);

    // The float system from `unique_solution_float`, scaled up.
    let sys = matrix![[1e12, -2e12, 1e12, 1e12], [0.0, 2e12, -8e12, 0.0], [5e12, 0.0, -5e12, -1e12]]
        .unwrap();
    let solution = find_solutions(&sys).unwrap().unwrap();
    for (x, e) in solution.iter().zip([-0.4, -0.8, -0.2]) {
        assert_relative_eq!(x.unwrap(), e, epsilon = 1e-12);
    }
}

#[test]
fn inconsistent_system() {
    let sys = ints(&[&[1, 1, 1, 2], &[2, 2, 2, 5], &[0, 1, 1, 1]]);
    assert!(is_inconsistent(&rref(&sys, true)));
    assert_eq!(find_solutions(&sys).unwrap(), None);

    let sys = matrix![[1.0, 2.0, 3.0], [2.0, 4.0, 7.0]].unwrap();
    assert_eq!(find_solutions(&sys).unwrap(), None);
}

#[test]
fn positional_echelon_checks() {
    // Staircase broken (rows 1 and 2 both lead in column 2), yet accepted.
    let sys = matrix![[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 3.0, 1.0], [0.0, 0.0, 5.0, 1.0]]
        .unwrap();
    assert!(is_in_echelon_form(&sys, &get_pivots(&sys)));

    // A proper reduced form of a wide system: column 2 leads on row 1, and
    // row 1 is above position 2, so the positional check rejects it.
    let sys = matrix![[1.0, 2.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]].unwrap();
    assert!(is_in_echelon_form(&sys, &get_pivots(&sys)));
    assert!(!is_in_reduced_echelon_form(&sys, &get_pivots(&sys)));
}

#[test]
fn rearrange_moves_dense_rows_up() {
    let sys = matrix![[0.0, 0.0, 1.0, 1.0, 7.0], [2.0, 1.0, 0.0, 0.0, 8.0]].unwrap();
    let sorted = rearrange(sys);
    assert_eq!(sorted[(0, 4)], 8.0);
    assert_eq!(sorted[(1, 4)], 7.0);
}

#[test]
fn display() {
    // One unknown: x = 2 and 3x = 4.
    let sys = ints(&[&[1, 2], &[3, 4]]);
    let reduced = rref(&sys, true);
    assert_eq!(reduced.to_string(), "[1, 2]\n[0, -2]");

    let m = matrix![[fr("1/2"), fr("2")], [fr("0"), fr("-3/4")]].unwrap();
    assert_eq!(m.to_string(), "[1/2, 2]\n[0, -3/4]");
    assert_eq!(vector![1, 2, 3].to_string(), "[1, 2, 3]");
}

#[test]
fn transpose_of_column_is_a_vector() {
    let column = matrix![[1.0], [2.0], [3.0]].unwrap();
    match column.transpose() {
        Transposed::Vector(v) => assert_eq!(v, vector![1.0, 2.0, 3.0]),
        Transposed::Matrix(_) => panic!("expected a vector"),
    }
}
