//! Live preset editing.
//!
//! A [`PresetEditor`] owns a working copy of the parameters decoded from the
//! host's preset. Every control change is applied to the copy, re-encoded and
//! pushed to the host through a [`PresetEditCallback`], so the running
//! pipeline hears the edit immediately. Cancelling re-sends the original
//! blob unchanged.

use upmix_config::{ControlValues, DisplayStrings, SurroundParams};

/// Receives preset blobs while an editor is open.
pub trait PresetEditCallback {
    /// Called with the full encoded preset after every change.
    fn on_preset_changed(&mut self, preset: &[u8]);
}

impl<F: FnMut(&[u8])> PresetEditCallback for F {
    fn on_preset_changed(&mut self, preset: &[u8]) {
        self(preset);
    }
}

/// Editing session over one preset.
///
/// ```rust
/// use upmix_config::{ControlValues, SurroundParams};
/// use upmix_plugin::PresetEditor;
///
/// let original = SurroundParams::default().to_bytes();
/// let mut sent: Vec<Vec<u8>> = Vec::new();
///
/// let mut editor = PresetEditor::new(&original, |blob: &[u8]| sent.push(blob.to_vec()));
/// let labels = editor.update(ControlValues { wrap: 50, ..editor.controls() });
/// assert_eq!(labels.wrap, "(180)");
/// editor.cancel();
///
/// assert_eq!(sent.len(), 2);
/// assert_eq!(sent[1], original);
/// ```
pub struct PresetEditor<C: PresetEditCallback> {
    original: Vec<u8>,
    working: SurroundParams,
    callback: C,
}

impl<C: PresetEditCallback> PresetEditor<C> {
    /// Opens an editor on `preset`. Undecodable blobs start from defaults.
    pub fn new(preset: &[u8], callback: C) -> Self {
        Self {
            original: preset.to_vec(),
            working: SurroundParams::from_bytes(preset),
            callback,
        }
    }

    /// Current working parameters.
    pub fn params(&self) -> &SurroundParams {
        &self.working
    }

    /// Control positions for the working parameters.
    pub fn controls(&self) -> ControlValues {
        ControlValues::from_params(&self.working)
    }

    /// Labels for the working parameters.
    pub fn display(&self) -> DisplayStrings {
        DisplayStrings::of(&self.working)
    }

    /// Applies `controls`, notifies the host and returns the new labels.
    pub fn update(&mut self, controls: ControlValues) -> DisplayStrings {
        controls.apply(&mut self.working);
        let blob = self.working.to_bytes();
        tracing::trace!("PresetEditor: sending {} byte preset", blob.len());
        self.callback.on_preset_changed(&blob);
        self.display()
    }

    /// Restores the original preset on the host and closes the editor.
    pub fn cancel(mut self) -> C {
        tracing::debug!("PresetEditor: cancelled, restoring original preset");
        self.callback.on_preset_changed(&self.original);
        self.callback
    }

    /// Closes the editor, keeping whatever was last sent.
    pub fn finish(self) -> C {
        self.callback
    }
}
