mod admin;
mod attempt;
mod batch;
mod history;
mod login;
mod state;
mod tryout;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use attempt::AttemptView;
pub use batch::BatchView;
pub use history::HistoryView;
pub use login::LoginView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use tryout::TryoutView;
