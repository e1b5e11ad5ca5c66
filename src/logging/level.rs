use serde::{Deserialize, Serialize};
use std::fmt;

/// severity level of log messages
///
/// ordered by numeric value, so a more severe level compares lower
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(i8)]
pub enum Level {
    /// meta level representing no log messages
    Off = -1,
    /// system is unusable
    Emerg = 0,
    /// action must be taken immediately
    Alert = 1,
    /// critical conditions
    Crit = 2,
    /// error conditions
    Err = 3,
    /// warning conditions
    Warning = 4,
    /// normal but significant conditions
    Notice = 5,
    /// informational messages
    Info = 6,
    /// debug-level messages
    Debug = 7,
    /// trace messages
    Trace = 8,
    /// meta level representing all log messages
    All = 9,
}

impl Level {
    pub const ALL_LEVELS: [Level; 11] = [
        Level::Off,
        Level::Emerg,
        Level::Alert,
        Level::Crit,
        Level::Err,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
        Level::Trace,
        Level::All,
    ];

    fn index(self) -> usize {
        (self as i8 + 1) as usize
    }

    /// single character form; EMERG is 'P' (it used to be "panic") so it
    /// doesn't clash with ERR
    pub fn as_char(self) -> char {
        const CHARS: [char; 11] = [' ', 'P', 'A', 'C', 'E', 'W', 'N', 'I', 'D', 'T', ' '];
        CHARS[self.index()]
    }

    pub fn as_uppercase(self) -> &'static str {
        const NAMES: [&str; 11] = [
            "OFF", "EMERG", "ALERT", "CRIT", "ERR", "WARNING", "NOTICE", "INFO", "DEBUG", "TRACE",
            "ALL",
        ];
        NAMES[self.index()]
    }

    pub fn as_lowercase(self) -> &'static str {
        const NAMES: [&str; 11] = [
            "off", "emerg", "alert", "crit", "err", "warning", "notice", "info", "debug", "trace",
            "all",
        ];
        NAMES[self.index()]
    }

    /// meta levels can't be attached to a message
    pub fn clamp_to_message(self) -> Level {
        self.clamp(Level::Emerg, Level::Trace)
    }

    /// uppercase names of every level, OFF first
    pub fn names_uppercase() -> Vec<&'static str> {
        Self::ALL_LEVELS.iter().map(|l| l.as_uppercase()).collect()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_uppercase())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, <Self as std::str::FromStr>::Err> {
        Self::ALL_LEVELS
            .iter()
            .copied()
            .find(|l| l.as_uppercase().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid log level: {}", s))
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_uppercase().to_string()
    }
}

/// facility type of the process logging a message (syslog numbering)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Facility {
    /// kernel messages
    Kern = 0,
    /// user-level messages
    User,
    /// mail system
    Mail,
    /// system daemons
    Daemon,
    /// security/authentication messages
    Auth,
    /// messages generated internally by the logger
    Syslog,
    /// line printer subsystem
    Lpr,
    /// network news subsystem
    News,
    Uucp,
    /// clock daemon
    Cron,
    /// security/authentication messages (private)
    Authpriv,
    Ftp,
    Ntp,
    /// log audit
    Security,
    /// log alert
    Console,
    /// scheduling daemon
    Cron2,
    #[default]
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    pub const ALL_FACILITIES: [Facility; 24] = [
        Facility::Kern,
        Facility::User,
        Facility::Mail,
        Facility::Daemon,
        Facility::Auth,
        Facility::Syslog,
        Facility::Lpr,
        Facility::News,
        Facility::Uucp,
        Facility::Cron,
        Facility::Authpriv,
        Facility::Ftp,
        Facility::Ntp,
        Facility::Security,
        Facility::Console,
        Facility::Cron2,
        Facility::Local0,
        Facility::Local1,
        Facility::Local2,
        Facility::Local3,
        Facility::Local4,
        Facility::Local5,
        Facility::Local6,
        Facility::Local7,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_lowercase(self) -> &'static str {
        const NAMES: [&str; 24] = [
            "kern", "user", "mail", "daemon", "auth", "syslog", "lpr", "news", "uucp", "cron",
            "authpriv", "ftp", "ntp", "security", "console", "cron2", "local0", "local1",
            "local2", "local3", "local4", "local5", "local6", "local7",
        ];
        NAMES[self as usize]
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_lowercase())
    }
}

impl std::str::FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_FACILITIES
            .iter()
            .copied()
            .find(|f| f.as_lowercase().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid log facility: {}", s))
    }
}
