mod interaction;
mod persistence;

pub use interaction::InteractionState;
pub use persistence::DocumentSnapshot;
