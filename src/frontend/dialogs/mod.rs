//! Modal windows of the console: the dashboard entry form, the gitops form
//! and the delete confirmation.
//!
//! A page owns an open flag plus the dialog's state and calls
//! [`show_dialog`] every frame. Forms keep their window open after Save and
//! wait for the page to close them once the mutation outcome arrives.

use egui::{Align2, Context, Ui};

/// What the user did in a dialog this frame.
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    #[default]
    None,
    /// Cancel or dismiss
    Close,
    /// Confirmed; the window goes away immediately
    CloseWithAction(A),
    /// Submitted; the window stays up until the page closes it
    Action(A),
}

impl<A> DialogAction<A> {
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close | DialogAction::CloseWithAction(_))
    }

    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::CloseWithAction(a) | DialogAction::Action(a) => Some(a),
            DialogAction::None | DialogAction::Close => None,
        }
    }
}

/// Dialog state; reset to `Default` whenever the window closes.
pub trait DialogState: Default {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the primary button may be pressed.
    fn is_valid(&self) -> bool {
        true
    }
}

/// A centered, fixed-size modal window.
pub trait Dialog {
    type State: DialogState;
    type Action;
    /// Borrowed data the dialog reads while rendering
    type Context<'a>;

    const WIDTH: f32 = 400.0;

    fn title(state: &Self::State) -> &'static str;

    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Draw dialog `D` while `is_open` is set.
///
/// Closing clears `is_open` and resets `state`. Returns the action the
/// dialog produced this frame, if any.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let mut result = DialogAction::None;
    egui::Window::new(D::title(state))
        .collapsible(false)
        .resizable(false)
        .default_width(D::WIDTH)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            result = D::render(state, dialog_ctx, ui);
        });

    if result.should_close() {
        *is_open = false;
        state.reset();
    }
    result.into_action()
}

pub mod confirm_delete;
pub mod entry_form;
pub mod gitops_form;

pub use confirm_delete::{
    ConfirmDeleteAction, ConfirmDeleteDialog, ConfirmDeleteState,
};
pub use entry_form::{EntryFormAction, EntryFormDialog, EntryFormState};
pub use gitops_form::{GitopsFormAction, GitopsFormDialog, GitopsFormState};
