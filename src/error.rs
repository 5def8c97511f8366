use thiserror::Error;

/// Returned by the checked constructors (`try_new` and friends).
///
/// The unchecked constructors never produce it: a negative extent or radius is accepted
/// there and silently corrupts the derived tests.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeomError {
    #[error("negative extent on the {axis} axis: {value}")]
    NegativeExtent { axis: char, value: f32 },
    #[error("negative radius: {0}")]
    NegativeRadius(f32),
    #[error("non-finite component in {0}")]
    NonFinite(&'static str),
    #[error("ray direction has zero length")]
    ZeroDirection,
}

pub(crate) fn check_finite(what: &'static str, components: &[f32]) -> Result<(), GeomError> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeomError::NonFinite(what))
    }
}
