//! Built-in list of CRS codes offered as station suggestions.
//!
//! Kept sorted so lookups can binary search.

/// Known station CRS codes, ascending.
pub const KNOWN_STATIONS: &[&str] = &[
    "ABD", "ABW", "ACT", "ADV", "AHV", "ALT", "AMR", "ANZ", "ARL", "ASC", "ASI", "AYR",
    "BAN", "BAT", "BBN", "BCE", "BDM", "BDQ", "BEX", "BFD", "BFR", "BHI", "BHM", "BIG",
    "BKG", "BKH", "BMH", "BMS", "BNY", "BON", "BPW", "BRI", "BSK", "BTH", "BTN", "BXB",
    "CBG", "CBW", "CDF", "CHX", "CLJ", "CMB", "CMD", "CNM", "COL", "COV", "CPM", "CRE",
    "CRS", "CRV", "CST", "CTK", "CTR", "CYB", "DAR", "DBY", "DEE", "DFD", "DID", "DKG",
    "DMK", "DON", "DOV", "DVP", "DYP", "EAL", "ECR", "EDB", "EDG", "EDP", "EGH", "ELY",
    "EPS", "EUS", "EWR", "EXC", "EXD", "EXT", "FEL", "FKC", "FKW", "FNB", "FOK", "FPK",
    "FRM", "GAT", "GLC", "GLD", "GLQ", "GRA", "GTW", "GUI", "GYP", "HAV", "HAY", "HBY",
    "HFD", "HGS", "HHY", "HIT", "HMS", "HNH", "HOO", "HOU", "HRH", "HRO", "HRS", "HSK",
    "HUD", "HUL", "HWI", "HWY", "HYM", "IFD", "INV", "IPS", "KGX", "KIN", "KNG", "KTN",
    "LAN", "LBG", "LDS", "LEI", "LEW", "LGF", "LIC", "LIN", "LIV", "LST", "LTN", "LUT",
    "MAN", "MAR", "MCO", "MCV", "MDE", "MDW", "MIA", "MKC", "MOG", "MOT", "NAN", "NBY",
    "NCL", "NMP", "NOT", "NRW", "NTH", "NUN", "NWP", "NXG", "OLD", "OXF", "PAD", "PBO",
    "PLY", "PMH", "PMR", "PNE", "PRE", "PRS", "PTH", "RAI", "RDG", "RET", "RMD", "ROM",
    "RUG", "RYS", "SAL", "SBY", "SCA", "SDY", "SEV", "SHF", "SIT", "SLD", "SLO", "SMA",
    "SNF", "SOT", "SOU", "SPT", "SRA", "SSD", "STA", "STE", "STG", "STP", "SUN", "SUR",
    "SVS", "SWA", "SWI", "SYB", "TAU", "TBW", "TON", "TPN", "TRU", "TUH", "TWI", "UXB",
    "VIC", "VXH", "WAT", "WBQ", "WCF", "WDB", "WEY", "WFJ", "WGN", "WIM", "WKF", "WLF",
    "WMW", "WNS", "WOF", "WOK", "WOS", "WRX", "WSB", "WVF", "WVH", "WWI", "WYM", "YRK",
    "ZFD", "ZLW", "ZWL",
];
