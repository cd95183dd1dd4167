mod chrome_finder;
mod google;
mod launcher;
mod profile;
mod selector;
mod session;

pub use chrome_finder::ChromeFinder;
pub use google::GoogleSession;
pub use launcher::ChromeLauncher;
pub use profile::ProfileManager;
pub use selector::{Selector, Strategy};
pub use session::{DriverSession, FormField};

// The façade surfaces the workflow's own error taxonomy; engine errors are
// folded into it at each call site.
pub use pwcycle_core::{Error, Result};
