//! Theme toggle.

use quickcart_storefront::error::Result;
use quickcart_storefront::state::{AppState, Session};

/// Flip the persisted dark-mode flag.
pub fn run(state: &AppState, session: &mut Session) -> Result<()> {
    let dark = session.toggle_dark_mode(state)?;
    if dark {
        println!("Dark mode on");
    } else {
        println!("Dark mode off");
    }
    Ok(())
}
