/// Lifecycle of a lazily decoded image.
///
/// Loading → Resident, or Loading → Failed. Entries never go back to
/// Loading; a structural cache reset is the only way to retry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidencyState {
    Loading,
    Resident,
    Failed,
}

impl ResidencyState {
    pub fn is_settled(self) -> bool {
        !matches!(self, ResidencyState::Loading)
    }
}

/// Decode progress reported by the host for a loading handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadProbe {
    Pending,
    Ready,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::ResidencyState;

    #[test]
    fn only_loading_is_unsettled() {
        assert!(!ResidencyState::Loading.is_settled());
        assert!(ResidencyState::Resident.is_settled());
        assert!(ResidencyState::Failed.is_settled());
    }
}
