//! Splitting a requested output size over three combinatorial axes.

use crate::types::AllocationPlan;

/// Decide how many substitution combinations (x), target structures (y) and
/// repair paths (z) to draw so that `x * y * z >= step`.
///
/// x grows every round, y and z each grow by one per round until they hit
/// their ceilings. A zero `ceiling_y` means no structural repair is in play
/// and returns `(step, 0, ceiling_z)` untouched. A zero `ceiling_z` leaves
/// the path axis out of the product.
pub fn allocate(step: usize, ceiling_y: usize, ceiling_z: usize) -> AllocationPlan {
    if ceiling_y == 0 {
        return AllocationPlan {
            substitutions: step,
            structures: 0,
            paths: ceiling_z,
        };
    }

    let (mut x, mut y) = (1usize, 1usize);
    let mut z = ceiling_z.min(1);
    let product = |x: usize, y: usize, z: usize| x * y * z.max(1);

    while product(x, y, z) < step {
        x += 1;
        if product(x, y, z) >= step {
            break;
        }
        if y < ceiling_y {
            y += 1;
            if product(x, y, z) >= step {
                break;
            }
        }
        if z < ceiling_z {
            z += 1;
        }
    }

    AllocationPlan {
        substitutions: x,
        structures: y,
        paths: z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_worked_examples() {
        assert_eq!(allocate(10, 2, 2).as_tuple(), (3, 2, 2));
        assert_eq!(allocate(100, 9, 2).as_tuple(), (8, 7, 2));
        assert_eq!(allocate(0, 0, 0).as_tuple(), (0, 0, 0));
    }

    #[test]
    fn test_no_structure_axis() {
        assert_eq!(allocate(7, 0, 3).as_tuple(), (7, 0, 3));
        assert_eq!(allocate(1000, 0, 1).as_tuple(), (1000, 0, 1));
    }

    #[test]
    fn test_small_steps() {
        assert_eq!(allocate(1, 5, 5).as_tuple(), (1, 1, 1));
        assert_eq!(allocate(2, 5, 5).as_tuple(), (2, 1, 1));
    }

    #[test]
    fn test_absent_path_axis() {
        let plan = allocate(20, 3, 0);
        assert_eq!(plan.paths, 0);
        assert!(plan.substitutions * plan.structures >= 20);
        assert!(plan.structures <= 3);
    }

    proptest! {
        #[test]
        fn plan_covers_step_within_ceilings(
            step in 0usize..5_000,
            ceiling_y in 1usize..20,
            ceiling_z in 1usize..6,
        ) {
            let plan = allocate(step, ceiling_y, ceiling_z);
            prop_assert!(plan.substitutions * plan.structures * plan.paths >= step);
            prop_assert!(plan.structures <= ceiling_y);
            prop_assert!(plan.paths <= ceiling_z);
        }
    }
}
