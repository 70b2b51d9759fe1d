//! Fixed column layout of HAProxy's `show stat` CSV output
//!
//! Columns are mapped positionally. The layout is the HAProxy 1.4 column set,
//! which every later release keeps as a prefix; trailing columns added by
//! newer releases are ignored.

/// Generates the ordered field list and the matching [`Field`] enum.
///
/// Variant order is column order, so `Field::X as usize` is the column index.
macro_rules! stat_fields {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $name:literal
        ),+ $(,)?
    ) => {
        /// A named column of the stats CSV
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(usize)]
        pub enum Field {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        /// Column names in CSV order
        pub const FIELDS: &[&str] = &[$($name),+];

        impl Field {
            /// Every field, in column order
            pub const ALL: &'static [Field] = &[$(Field::$variant),+];

            /// Column name as printed in the CSV header
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)+
                }
            }
        }
    };
}

stat_fields! {
    /// Proxy name
    PxName => "pxname",
    /// Service name: `FRONTEND`, `BACKEND` or a server name
    SvName => "svname",
    /// Currently queued requests
    QCur => "qcur",
    QMax => "qmax",
    /// Current sessions
    SCur => "scur",
    SMax => "smax",
    /// Session limit
    SLim => "slim",
    STot => "stot",
    /// Bytes in
    BIn => "bin",
    /// Bytes out
    BOut => "bout",
    DReq => "dreq",
    DResp => "dresp",
    /// Request errors
    EReq => "ereq",
    /// Connection errors
    ECon => "econ",
    /// Response errors
    EResp => "eresp",
    /// Retries (warning)
    WRetr => "wretr",
    /// Redispatches (warning)
    WRedis => "wredis",
    /// UP/DOWN/NOLB/MAINT/OPEN/CLOSED
    Status => "status",
    Weight => "weight",
    Act => "act",
    Bck => "bck",
    /// Failed health checks
    ChkFail => "chkfail",
    ChkDown => "chkdown",
    LastChg => "lastchg",
    /// Total downtime in seconds
    Downtime => "downtime",
    /// Queue limit
    QLimit => "qlimit",
    Pid => "pid",
    Iid => "iid",
    Sid => "sid",
    Throttle => "throttle",
    LbTot => "lbtot",
    Tracked => "tracked",
    /// 0=frontend, 1=backend, 2=server, 3=socket
    Type => "type",
    Rate => "rate",
    RateLim => "rate_lim",
    RateMax => "rate_max",
    CheckStatus => "check_status",
    CheckCode => "check_code",
    CheckDuration => "check_duration",
    Hrsp1xx => "hrsp_1xx",
    Hrsp2xx => "hrsp_2xx",
    Hrsp3xx => "hrsp_3xx",
    Hrsp4xx => "hrsp_4xx",
    Hrsp5xx => "hrsp_5xx",
    HrspOther => "hrsp_other",
    HanaFail => "hanafail",
    ReqRate => "req_rate",
    ReqRateMax => "req_rate_max",
    /// Total HTTP requests received
    ReqTot => "req_tot",
    /// Transfers aborted by the client
    CliAbrt => "cli_abrt",
    /// Transfers aborted by the server
    SrvAbrt => "srv_abrt",
}

/// Number of modeled columns
pub const FIELD_COUNT: usize = FIELDS.len();

impl Field {
    /// Column index of this field
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
