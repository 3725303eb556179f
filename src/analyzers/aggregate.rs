use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::stats::GradedStudent;

/// Returns the student with the highest final score.
///
/// Ties go to the earliest student in `students`; a later equal score never
/// replaces it. Returns `None` when there are no students.
pub fn overall_topper(students: &[GradedStudent]) -> Option<&GradedStudent> {
    let mut iter = students.iter();
    let mut top = iter.next()?;

    for s in iter {
        if s.final_score > top.final_score {
            top = s;
        }
    }

    Some(top)
}

/// Finds the top student of each university.
///
/// Universities are keyed by exact name, so `"StateU"` and `"stateu"` are
/// different groups. Within a group the tie rule matches [`overall_topper`].
pub fn topper_per_university(students: &[GradedStudent]) -> HashMap<&str, &GradedStudent> {
    let mut toppers: HashMap<&str, &GradedStudent> = HashMap::new();

    for s in students {
        match toppers.entry(s.university()) {
            Entry::Vacant(slot) => {
                slot.insert(s);
            }
            Entry::Occupied(mut slot) => {
                if s.final_score > slot.get().final_score {
                    slot.insert(s);
                }
            }
        }
    }

    toppers
}
