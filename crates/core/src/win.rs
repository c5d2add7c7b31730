//! Win detection: is the solution pattern present somewhere in the field?
//!
//! Only atom cells of the solution constrain the match; every other
//! solution cell (walls included) is a wildcard.

use crate::grid::Grid;

/// Top-left offset of the first match, scanning offsets row-major.
pub fn find_match(field: &Grid, solution: &Grid) -> Option<(usize, usize)> {
    let (fw, fh) = (field.width(), field.height());
    let (sw, sh) = (solution.width(), solution.height());
    if fw == 0 || fh == 0 || sw == 0 || sh == 0 || sw > fw || sh > fh {
        return None;
    }

    for y in 0..=fh - sh {
        for x in 0..=fw - sw {
            if matches_at(field, solution, x, y) {
                return Some((x, y));
            }
        }
    }
    None
}

fn matches_at(field: &Grid, solution: &Grid, x: usize, y: usize) -> bool {
    for sy in 0..solution.height() {
        for sx in 0..solution.width() {
            let want = solution.at(sx, sy);
            if want.is_atom() && !field.at(x + sx, y + sy).is_atom() {
                return false;
            }
        }
    }
    true
}

pub fn is_won(field: &Grid, solution: &Grid) -> bool {
    find_match(field, solution).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_atom_matches_anywhere() {
        let solution = Grid::from_ascii(&["a"]);
        let field = Grid::from_ascii(&["#####", "#..a#", "#####"]);
        assert_eq!(find_match(&field, &solution), Some((3, 1)));
    }

    #[test]
    fn test_all_free_field_never_matches() {
        let solution = Grid::from_ascii(&["a"]);
        let field = Grid::from_ascii(&["....", "...."]);
        assert!(!is_won(&field, &solution));
    }

    #[test]
    fn test_empty_solution_never_matches() {
        let solution = Grid::from_ascii(&["..."]);
        let field = Grid::from_ascii(&["#a#"]);
        assert!(!is_won(&field, &solution));
    }

    #[test]
    fn test_atom_types_must_line_up() {
        let solution = Grid::from_ascii(&["ab", "c "]);
        let field = Grid::from_ascii(&["#####", "#ab.#", "#.c.#", "#####"]);
        assert!(!is_won(&field, &solution));

        let solved = Grid::from_ascii(&["#####", "#ab.#", "#c..#", "#####"]);
        assert_eq!(find_match(&solved, &solution), Some((1, 1)));
    }

    #[test]
    fn test_match_ignores_atom_variant() {
        // Only the atom tag is compared; the variant index is not.
        let solution = Grid::from_ascii(&["ab"]);
        let field = Grid::from_ascii(&["#zz#"]);
        assert!(is_won(&field, &solution));
    }

    #[test]
    fn test_solution_walls_are_wildcards() {
        let solution = Grid::from_ascii(&["a#a"]);
        let field = Grid::from_ascii(&["a.a"]);
        assert!(is_won(&field, &solution));
    }

    #[test]
    fn test_solution_larger_than_field() {
        let solution = Grid::from_ascii(&["aaaa"]);
        let field = Grid::from_ascii(&["aa"]);
        assert!(!is_won(&field, &solution));
    }
}
