mod ai;
mod note;
mod ticket;

pub use ai::AiCommands;
pub use note::NoteCommands;
pub use ticket::TicketCommands;
