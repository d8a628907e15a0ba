//! Mode-driven field visibility.
//!
//! [`ModeVisibilityController::apply`] is a pure function from a mode to a
//! [`FieldPlan`]. [`ModeVisibilityController::switch_mode`] applies the
//! clearing part of the plan to a [`CriteriaState`]; rendering the plan is left
//! to the caller.
//!
//! ```text
//!              serial           nakshatra
//! serial_no    VisibleRequired  HiddenCleared
//! nakshatra_id HiddenCleared    VisibleRequired
//! gender       HiddenCleared    VisibleRequired
//! seeker_age   HiddenCleared    VisibleRequired
//! gothram      HiddenCleared    VisibleRequired
//! rasi toggle  VisibleOptional  VisibleOptional
//! rasi         HiddenDisabled   VisibleOptional (refined by the rasi gate)
//! age pref     VisibleOptional  VisibleOptional
//! ```
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CriteriaState, Field, SearchMode};

/// What the UI must do with one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDisposition {
    VisibleRequired,
    VisibleOptional,
    /// Hidden, disabled and reset to its empty value.
    HiddenCleared,
    /// Hidden and disabled; the value is retained but not submitted.
    HiddenDisabled,
}

impl FieldDisposition {
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            FieldDisposition::VisibleRequired | FieldDisposition::VisibleOptional
        )
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FieldDisposition::VisibleRequired)
    }

    pub fn clears(&self) -> bool {
        matches!(self, FieldDisposition::HiddenCleared)
    }
}

/// Form sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Serial,
    Nakshatra,
    AdditionalFilters,
}

/// Visibility of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPlan {
    pub section: Section,
    pub visible: bool,
}

/// Disposition of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub field: Field,
    pub disposition: FieldDisposition,
}

/// Full visibility plan for a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlan {
    pub mode: SearchMode,
    pub sections: Vec<SectionPlan>,
    pub fields: Vec<FieldEntry>,
    /// Any displayed validation error must be dropped; it may point at a
    /// field that is about to be hidden.
    pub clear_error: bool,
}

impl FieldPlan {
    /// Disposition of `field`. Every managed field has an entry.
    pub fn disposition(&self, field: Field) -> FieldDisposition {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.disposition)
            .unwrap_or(FieldDisposition::VisibleOptional)
    }

    pub fn section_visible(&self, section: Section) -> bool {
        self.sections
            .iter()
            .any(|plan| plan.section == section && plan.visible)
    }

    /// Fields this plan resets to empty.
    pub fn cleared_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|entry| entry.disposition.clears())
            .map(|entry| entry.field)
    }
}

/// Outcome of selecting a mode on a live form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSwitch {
    pub plan: FieldPlan,
    /// `false` when the selected mode was already active.
    pub changed: bool,
    /// Fields that actually held a value and were reset.
    pub cleared: Vec<Field>,
}

/// Decides field visibility from the selected mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeVisibilityController;

impl ModeVisibilityController {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, mode: SearchMode) -> FieldPlan {
        let fields = Field::ALL
            .iter()
            .map(|&field| FieldEntry {
                field,
                disposition: disposition_for(mode, field),
            })
            .collect();

        FieldPlan {
            mode,
            sections: vec![
                SectionPlan {
                    section: Section::Serial,
                    visible: mode == SearchMode::Serial,
                },
                SectionPlan {
                    section: Section::Nakshatra,
                    visible: mode == SearchMode::Nakshatra,
                },
                SectionPlan {
                    section: Section::AdditionalFilters,
                    visible: true,
                },
            ],
            fields,
            clear_error: true,
        }
    }

    /// Select `mode` on `state`, clearing only the fields owned by the mode
    /// being deactivated. Re-selecting the active mode changes nothing.
    pub fn switch_mode(&self, state: &mut CriteriaState, mode: SearchMode) -> ModeSwitch {
        let mut plan = self.apply(mode);

        if state.mode == Some(mode) {
            plan.clear_error = false;
            return ModeSwitch {
                plan,
                changed: false,
                cleared: Vec::new(),
            };
        }

        let deactivated = mode.other();
        let mut cleared = Vec::new();
        for field in plan.cleared_fields() {
            debug_assert_eq!(field.owner(), Some(deactivated));
            if !state.is_empty(field) {
                cleared.push(field);
            }
            state.clear(field);
        }
        state.mode = Some(mode);

        debug!(
            mode = %mode,
            cleared = ?cleared,
            "criteria.mode_switch"
        );

        ModeSwitch {
            plan,
            changed: true,
            cleared,
        }
    }
}

fn disposition_for(mode: SearchMode, field: Field) -> FieldDisposition {
    match field.owner() {
        Some(owner) if owner == mode => FieldDisposition::VisibleRequired,
        Some(_) => FieldDisposition::HiddenCleared,
        None => match (field, mode) {
            (Field::Rasi, SearchMode::Serial) => FieldDisposition::HiddenDisabled,
            _ => FieldDisposition::VisibleOptional,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gender;

    fn filled_nakshatra_state() -> CriteriaState {
        CriteriaState {
            mode: Some(SearchMode::Nakshatra),
            serial_no: String::new(),
            nakshatra_id: Some("7".into()),
            gender: Some(Gender::Female),
            seeker_age: "27".into(),
            gothram: "Bharadwaja".into(),
            rasi: "Simha".into(),
            enable_rasi_compatibility: true,
            age_preference: Some(32),
        }
    }

    #[test]
    fn serial_plan_hides_nakshatra_fields() {
        let plan = ModeVisibilityController::new().apply(SearchMode::Serial);
        assert_eq!(
            plan.disposition(Field::SerialNo),
            FieldDisposition::VisibleRequired
        );
        for field in [
            Field::NakshatraId,
            Field::Gender,
            Field::SeekerAge,
            Field::Gothram,
        ] {
            assert_eq!(plan.disposition(field), FieldDisposition::HiddenCleared);
        }
        assert_eq!(plan.disposition(Field::Rasi), FieldDisposition::HiddenDisabled);
        assert!(plan.section_visible(Section::Serial));
        assert!(!plan.section_visible(Section::Nakshatra));
        assert!(plan.section_visible(Section::AdditionalFilters));
    }

    #[test]
    fn nakshatra_plan_is_the_inverse() {
        let plan = ModeVisibilityController::new().apply(SearchMode::Nakshatra);
        assert_eq!(plan.disposition(Field::SerialNo), FieldDisposition::HiddenCleared);
        assert_eq!(
            plan.disposition(Field::Gothram),
            FieldDisposition::VisibleRequired
        );
        assert_eq!(plan.disposition(Field::Rasi), FieldDisposition::VisibleOptional);
        assert!(plan.section_visible(Section::AdditionalFilters));
        assert_eq!(plan.cleared_fields().collect::<Vec<_>>(), vec![Field::SerialNo]);
    }

    #[test]
    fn switching_to_serial_clears_only_nakshatra_fields() {
        let controller = ModeVisibilityController::new();
        let mut state = filled_nakshatra_state();

        let switch = controller.switch_mode(&mut state, SearchMode::Serial);

        assert!(switch.changed);
        assert!(switch.plan.clear_error);
        assert_eq!(
            switch.cleared,
            vec![
                Field::NakshatraId,
                Field::Gender,
                Field::SeekerAge,
                Field::Gothram
            ]
        );
        assert_eq!(state.mode, Some(SearchMode::Serial));
        assert_eq!(state.nakshatra_id, None);
        assert_eq!(state.gender, None);
        assert!(state.seeker_age.is_empty());
        assert!(state.gothram.is_empty());
        assert!(state.enable_rasi_compatibility);
        assert_eq!(state.rasi, "Simha");
        assert_eq!(state.age_preference, Some(32));
    }

    #[test]
    fn switching_to_nakshatra_clears_serial_no_and_keeps_shared_fields() {
        let controller = ModeVisibilityController::new();
        let mut state = CriteriaState::with_mode(SearchMode::Serial);
        state.serial_no = "VM-0042".into();
        state.enable_rasi_compatibility = true;
        state.rasi = "Kanya".into();

        let switch = controller.switch_mode(&mut state, SearchMode::Nakshatra);

        assert_eq!(switch.cleared, vec![Field::SerialNo]);
        assert!(state.serial_no.is_empty());
        assert!(state.enable_rasi_compatibility);
        assert_eq!(state.rasi, "Kanya");
    }

    #[test]
    fn reselecting_active_mode_is_a_no_op() {
        let controller = ModeVisibilityController::new();
        let mut state = filled_nakshatra_state();
        let before = state.clone();

        let switch = controller.switch_mode(&mut state, SearchMode::Nakshatra);

        assert!(!switch.changed);
        assert!(!switch.plan.clear_error);
        assert!(switch.cleared.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn first_selection_initializes_mode() {
        let controller = ModeVisibilityController::new();
        let mut state = CriteriaState::new();
        state.serial_no = "typed before init".into();

        let switch = controller.switch_mode(&mut state, SearchMode::Nakshatra);

        assert!(switch.changed);
        assert_eq!(state.mode, Some(SearchMode::Nakshatra));
        assert!(state.serial_no.is_empty());
    }
}
