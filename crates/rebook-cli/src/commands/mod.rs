pub mod dates;
pub mod interval;

use anyhow::Result;
use rebook_core::models::Frequency;

use crate::views::table::display_frequencies;

pub fn frequencies_command() -> Result<()> {
    display_frequencies(&Frequency::ALL);
    Ok(())
}
