mod next_sequence_id;
mod now;

pub use next_sequence_id::next_sequence_id;
pub use now::now;
