use cropdash_fields::snapshot::FieldSnapshot;

/// The active view mode, resolved from the selection state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// No filter: aggregate covers every catalog feature.
    #[default]
    AllFields,
    /// Aggregate narrowed to one crop group (matched case-insensitively).
    CropFilter(String),
    /// Aggregate of exactly one catalog feature, by id.
    SingleField(String),
    /// Aggregate of one ad-hoc saved boundary with no index data.
    Snapshot(FieldSnapshot),
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Focus {
    #[default]
    None,
    Field(String),
    Snapshot(FieldSnapshot),
}

/// Tracks the current view mode.
///
/// Exactly one mode is active at a time; selecting a field or a
/// snapshot silently displaces the other (last write wins), and
/// dropping the focus reverts to the prevailing crop filter, which is
/// remembered across single-field selections.
///
/// Pure state holder: transitions have no side effects. Recomputation
/// of the aggregate is triggered by the owning session, not here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    crop_filter: Option<String>,
    focus: Focus,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    /// Set or clear the crop filter. Clears any field/snapshot focus.
    /// `None` or an empty name means "all crops".
    pub fn set_crop_filter(&mut self, crop: Option<&str>) {
        self.focus = Focus::None;
        self.crop_filter = crop
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
    }

    /// Focus a single catalog field, or revert to the prevailing crop
    /// filter (or all fields) on `None`.
    pub fn select_field(&mut self, id: Option<&str>) {
        self.focus = match id {
            Some(id) => Focus::Field(id.to_string()),
            None => Focus::None,
        };
    }

    /// Focus a saved snapshot. `None` clears all the way back to all
    /// fields (unlike dropping a field focus, which keeps the filter).
    pub fn select_snapshot(&mut self, snapshot: Option<FieldSnapshot>) {
        match snapshot {
            Some(snapshot) => self.focus = Focus::Snapshot(snapshot),
            None => {
                self.focus = Focus::None;
                self.crop_filter = None;
            }
        }
    }

    /// Reset to all fields, forgetting the crop filter.
    pub fn clear(&mut self) {
        *self = SelectionState::default();
    }

    pub fn crop_filter(&self) -> Option<&str> {
        self.crop_filter.as_deref()
    }

    /// Resolve the active mode. Focus wins over the crop filter.
    pub fn current(&self) -> Selection {
        match &self.focus {
            Focus::Field(id) => Selection::SingleField(id.clone()),
            Focus::Snapshot(snapshot) => Selection::Snapshot(snapshot.clone()),
            Focus::None => match &self.crop_filter {
                Some(crop) => Selection::CropFilter(crop.clone()),
                None => Selection::AllFields,
            },
        }
    }
}
