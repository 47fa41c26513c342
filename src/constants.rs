// Document layout
pub const ROOT_ELEMENT: &str = "snipspace";
pub const ATTACHMENTS_FIELD: &str = "attachments";
pub const ATTACHMENT_ELEMENT: &str = "attachment";

// Output naming
pub const INDEX_WIDTH: usize = 4;
pub const ATTACHMENT_INFIX: &str = "attachment";

// Default export profiles
pub const USER_ELEMENT: &str = "user";
pub const SNIP_ELEMENT: &str = "snip";

pub const USER_FIELDS: &[&str] = &[
    "login",
    "passwd",
    "email",
    "roles",
    "status",
    "cTime",
    "mTime",
    "lastAccess",
    "lastLogin",
    "lastLogout",
    "application",
];

pub const SNIP_FIELDS: &[&str] = &[
    "name",
    "oUser",
    "cUser",
    "mUser",
    "cTime",
    "mTime",
    "permissions",
    "backlinks",
    "sniplinks",
    "labels",
    "attachments",
    "viewCount",
    "content",
    "application",
    "parentSnip",
    "commentSnip",
];

pub const ATTACHMENT_FIELDS: &[&str] = &["name", "content-type", "size", "date", "location", "data"];

// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
