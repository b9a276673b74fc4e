use super::ticket::Ticket;

use std::time::Instant;

pub(crate) enum Command {
    Schedule { deadline: Instant, ticket: Ticket },
    Shutdown,
}
