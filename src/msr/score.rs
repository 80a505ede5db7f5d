//! Structural skeleton of the score model.
//!
//! ```text
//!   MsrScore
//!     └── MsrPartGroup
//!           └── MsrPart
//!                 └── MsrStaff
//!                       └── MsrVoice
//!                             └── MsrMeasure
//!                                   └── MsrElement
//! ```
//!
//! The tree is plain owned data; importers build it top-down with the
//! append methods and the transcription stages borrow it immutably.

use serde::{Deserialize, Serialize};

use super::elements::MsrElement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrScore {
    /// Work title from the source document's identification block.
    pub work_title: Option<String>,
    pub part_groups: Vec<MsrPartGroup>,
}

impl MsrScore {
    pub fn new(work_title: Option<&str>) -> MsrScore {
        MsrScore {
            work_title: work_title.map(|t| t.to_string()),
            part_groups: Vec::new(),
        }
    }

    pub fn append_part_group(&mut self, group: MsrPartGroup) -> &mut MsrPartGroup {
        self.part_groups.push(group);
        // Just pushed, so the vector cannot be empty.
        self.part_groups.last_mut().unwrap()
    }

    /// Total number of parts across all groups.
    pub fn part_count(&self) -> usize {
        self.part_groups.iter().map(|g| g.parts.len()).sum()
    }

    /// Total number of measures across all voices.
    pub fn measure_count(&self) -> usize {
        self.part_groups
            .iter()
            .flat_map(|g| &g.parts)
            .flat_map(|p| &p.staves)
            .flat_map(|s| &s.voices)
            .map(|v| v.measures.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrPartGroup {
    pub name: Option<String>,
    pub parts: Vec<MsrPart>,
}

impl MsrPartGroup {
    pub fn new(name: Option<&str>) -> MsrPartGroup {
        MsrPartGroup {
            name: name.map(|n| n.to_string()),
            parts: Vec::new(),
        }
    }

    pub fn append_part(&mut self, part: MsrPart) -> &mut MsrPart {
        self.parts.push(part);
        self.parts.last_mut().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrPart {
    /// Part id from the source document, "P1" style.
    pub id: String,
    pub name: Option<String>,
    pub staves: Vec<MsrStaff>,
}

impl MsrPart {
    pub fn new(id: &str, name: Option<&str>) -> MsrPart {
        MsrPart {
            id: id.to_string(),
            name: name.map(|n| n.to_string()),
            staves: Vec::new(),
        }
    }

    pub fn append_staff(&mut self, staff: MsrStaff) -> &mut MsrStaff {
        self.staves.push(staff);
        self.staves.last_mut().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrStaff {
    pub number: u32,
    pub voices: Vec<MsrVoice>,
}

impl MsrStaff {
    pub fn new(number: u32) -> MsrStaff {
        MsrStaff {
            number,
            voices: Vec::new(),
        }
    }

    pub fn append_voice(&mut self, voice: MsrVoice) -> &mut MsrVoice {
        self.voices.push(voice);
        self.voices.last_mut().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrVoice {
    pub number: u32,
    pub measures: Vec<MsrMeasure>,
}

impl MsrVoice {
    pub fn new(number: u32) -> MsrVoice {
        MsrVoice {
            number,
            measures: Vec::new(),
        }
    }

    pub fn append_measure(&mut self, measure: MsrMeasure) -> &mut MsrMeasure {
        self.measures.push(measure);
        self.measures.last_mut().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrMeasure {
    /// Print measure number. Source documents use strings ("1", "X3").
    pub number: String,
    pub input_line_number: u32,
    pub elements: Vec<MsrElement>,
}

impl MsrMeasure {
    pub fn new(number: &str, input_line_number: u32) -> MsrMeasure {
        MsrMeasure {
            number: number.to_string(),
            input_line_number,
            elements: Vec::new(),
        }
    }

    pub fn append_element(&mut self, element: MsrElement) {
        self.elements.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msr::elements::{MsrDurationKind, MsrNote};
    use crate::msr::pitch::MsrDiatonicStep;

    fn one_part_score() -> MsrScore {
        let mut score = MsrScore::new(Some("Counts"));
        let group = score.append_part_group(MsrPartGroup::new(None));
        let part = group.append_part(MsrPart::new("P1", Some("Music")));
        let staff = part.append_staff(MsrStaff::new(1));
        let voice = staff.append_voice(MsrVoice::new(1));
        for n in 1..=3 {
            let measure = voice.append_measure(MsrMeasure::new(&n.to_string(), n));
            measure.append_element(MsrElement::Note(MsrNote::pitched(
                n,
                MsrDiatonicStep::C,
                4,
                MsrDurationKind::Quarter,
            )));
        }
        score
    }

    #[test]
    fn test_counts_walk_the_whole_tree() {
        let score = one_part_score();
        assert_eq!(score.part_count(), 1);
        assert_eq!(score.measure_count(), 3);
    }

    #[test]
    fn test_append_returns_the_new_child() {
        let mut score = MsrScore::new(None);
        let group = score.append_part_group(MsrPartGroup::new(Some("strings")));
        assert_eq!(group.name.as_deref(), Some("strings"));
        assert_eq!(score.part_groups.len(), 1);
    }
}
