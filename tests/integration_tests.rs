//! Integration tests for the gridfill crossword filler.
//!
//! These exercise the complete pipeline — structure parsing, word-list
//! loading, CSP solving, and rendering — against fixture files, the same way
//! the CLI drives it.

use std::collections::HashSet;

use gridfill::crossword::Crossword;
use gridfill::render::FilledGrid;
use gridfill::solver::{Assignment, Solver};
use gridfill::word_list;

fn load_fixture_crossword(words_file: &str) -> Crossword {
    Crossword::load("tests/fixtures/structure.txt", format!("tests/fixtures/{words_file}"))
        .expect("fixture files must load")
}

/// Check the full solution contract: complete, unique words, right lengths,
/// agreeing crossings.
fn assert_solution_valid(crossword: &Crossword, assignment: &Assignment) {
    assert_eq!(assignment.len(), crossword.variables().len());

    let mut used = HashSet::new();
    for (&var, word) in assignment {
        assert!(used.insert(word.clone()), "word {word} reused");
        assert_eq!(word.len(), var.length, "wrong length for {var}");
        for &neighbor in crossword.neighbors(var) {
            let (i, j) = crossword.overlap(var, neighbor).expect("neighbors must overlap");
            let other = &assignment[&neighbor];
            assert_eq!(
                word.as_bytes()[i],
                other.as_bytes()[j],
                "{var} and {neighbor} disagree at their crossing"
            );
        }
    }
}

#[test]
fn test_solves_fixture_grid() {
    let crossword = load_fixture_crossword("words.txt");
    assert_eq!(crossword.variables().len(), 4);

    let assignment = Solver::new(&crossword).solve().expect("fixture grid is satisfiable");
    assert_solution_valid(&crossword, &assignment);
}

#[test]
fn test_unsolvable_word_list_reports_no_solution() {
    // No five-letter word exists for the long down slot
    let crossword = load_fixture_crossword("words_unsolvable.txt");
    assert!(Solver::new(&crossword).solve().is_none());
}

#[test]
fn test_rendered_grid_matches_structure() {
    let crossword = load_fixture_crossword("words.txt");
    let assignment = Solver::new(&crossword).solve().expect("fixture grid is satisfiable");

    let grid = FilledGrid::new(&crossword, &assignment);
    assert_eq!(grid.rows().len(), crossword.height());
    for (r, row) in grid.rows().iter().enumerate() {
        assert_eq!(row.len(), crossword.width());
        for (c, &cell) in row.iter().enumerate() {
            if crossword.is_open(r, c) {
                assert!(cell.is_ascii_uppercase(), "open cell ({r}, {c}) not filled");
            } else {
                assert_eq!(cell, '█', "blocked cell ({r}, {c}) rendered as {cell:?}");
            }
        }
    }
}

#[test]
fn test_in_memory_pipeline_without_files() {
    // Same flow a library consumer would use: raw strings in, assignment out.
    let structure = "___\n_##\n_##\n";
    let crossword = Crossword::parse(structure, "one\ntwo\nten").expect("valid structure");
    let assignment = Solver::new(&crossword).solve().expect("satisfiable");
    assert_solution_valid(&crossword, &assignment);
}

#[test]
fn test_word_list_normalization_feeds_solver() {
    let words = word_list::parse_from_str("Ten\nTWO\n one \nten\n");
    assert_eq!(words, vec!["ONE", "TEN", "TWO"]);

    let from_file = word_list::load_from_path("tests/fixtures/words.txt").unwrap();
    assert!(from_file.contains(&"STONE".to_string()));
    assert!(from_file.windows(2).all(|w| w[0] < w[1]), "loader output must be sorted");

    let crossword = Crossword::parse("___\n_##\n_##\n", "Ten\nTWO\n one \nten\n").unwrap();
    assert!(Solver::new(&crossword).solve().is_some());
}
