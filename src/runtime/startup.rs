use tracing::warn;

use crate::phone::Phone;

/// App to open at startup, from the `APP_KEY[#ID]` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchTarget {
    pub app: String,
    pub id: Option<String>,
}

pub fn parse_launch_target(arg: &str) -> Option<LaunchTarget> {
    let (app, id) = match arg.split_once('#') {
        Some((app, id)) => (app.trim(), Some(id.trim())),
        None => (arg.trim(), None),
    };
    if app.is_empty() {
        return None;
    }
    Some(LaunchTarget {
        app: app.to_string(),
        id: id.filter(|id| !id.is_empty()).map(str::to_string),
    })
}

/// Open the target app, deep linking when an id is given. Returns whether
/// the app was found.
pub fn apply_launch_target(phone: &mut Phone, target: &LaunchTarget) -> bool {
    let opened = match &target.id {
        Some(id) => phone.deep_link(&target.app, id),
        None => phone.open_app(&target.app),
    };
    if !opened {
        warn!(app = %target.app, "launch target not found, staying home");
    }
    opened
}
