//! Deferred option setters
//!
//! Option builders in this crate do not write into an options struct directly. Each
//! setter call records a closure, and the consumer applies the recorded closures in
//! order to a freshly allocated value once it actually needs the options. A closure
//! may reject its input, in which case application stops and the partially built
//! value is discarded.

use crate::error::Result;

/// A deferred mutation of an options value of type `T`
pub type Setter<T> = Box<dyn Fn(&mut T) -> Result<()> + Send + Sync>;

/// Exposes the deferred setters accumulated by an options builder
pub trait Lister<T> {
    /// Returns the recorded setters in the order they were added
    fn list(&self) -> &[Setter<T>];
}

/// Applies `setters` to `target` in order, stopping at the first failure
///
/// On error `target` holds the effects of every setter before the failing one and
/// should not be used.
pub fn apply_setters<T>(target: &mut T, setters: &[Setter<T>]) -> Result<()> {
    for (index, setter) in setters.iter().enumerate() {
        if let Err(e) = setter(target) {
            log::debug!("option setter {}/{} failed: {}", index + 1, setters.len(), e);
            return Err(e);
        }
    }

    Ok(())
}

/// Resolves one or more builders into a fresh options value
///
/// Builders are applied in slice order, so a field set by a later builder replaces the
/// value set by an earlier one. The first failing setter aborts resolution.
///
/// # Example
/// ```
/// use fleoptions::{data_key, new_options, DataKeyOptions};
///
/// let mut defaults = data_key();
/// defaults.set_key_alt_names(["default"]);
///
/// let mut overrides = data_key();
/// overrides.set_key_alt_names(["billing"]);
///
/// let options = new_options::<DataKeyOptions>(&[&defaults, &overrides]).unwrap();
/// assert_eq!(options.key_alt_names, Some(vec!["billing".to_string()]));
/// ```
pub fn new_options<T: Default>(listers: &[&dyn Lister<T>]) -> Result<T> {
    let mut options = T::default();

    for lister in listers {
        apply_setters(&mut options, lister.list())?;
    }

    log::trace!("resolved options from {} builder(s)", listers.len());

    Ok(options)
}
