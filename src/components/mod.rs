pub mod toast;

pub use toast::{Severity, ToastState, Toaster};
