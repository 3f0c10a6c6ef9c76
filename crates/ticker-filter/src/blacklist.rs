//! Word lists used by the ticker filter.

/// Common English words, finance jargon, Reddit-isms and trading verbs that
/// look like tickers but never are. Blocked with or without a `$` prefix.
pub const TICKER_BLACKLIST: &[&str] = &[
    // English words
    "THE", "FOR", "AND", "NEW", "HIGH", "LONG", "JUST", "BACK", "WELL", "GOOD", "BEST", "EVER",
    "EVEN", "ONLY", "VERY", "MUCH", "MOST", "MANY", "SOME", "LAST", "NEXT", "OVER", "LIKE",
    "KNOW", "TAKE", "MAKE", "COME", "LOOK", "WANT", "GIVE", "TELL", "WORK", "NEED", "WILL",
    "EACH", "THEM", "THEN", "THAN", "BEEN", "HAVE", "FROM", "WERE", "SAID", "DOES", "INTO",
    "ALSO", "MORE", "WHEN", "WITH", "WHAT", "THIS", "THAT", "YOUR", "THEY", "MADE", "HARD",
    "EASY", "HUGE", "MOVE", "FREE", "TRUE", "PART", "FULL", "DONE", "SAME", "HERE", "KEEP",
    "HELP", "TALK", "TURN", "LIVE", "FEEL", "SURE", "LOST", "FEAR", "PLAN", "LATE", "MEAN",
    "RATE", "STOP", "MUST", "NEAR", "SENT", "POST", "READ", "RICH", "POOR", "SAVE", "FUND",
    "WEEK", "YEAR", "DAYS", "TIME", "NEWS", "DATA", "FIND", "PICK", "DROP", "GRAB", "ZERO",
    "TANK", "FIRE", "PURE", "LINK", "MIND", "CORE", "EDGE", "SELF", "LIFE", "DEEP", "VAST",
    "WISE", "FLAT", "DUMB", "YALL", "HAHA", "LMAO", "IIRC", "FWIW", "IMHO",
    // Finance jargon
    "CEO", "CFO", "COO", "CTO", "IPO", "ETF", "SEC", "FDA", "EPS", "ATH", "GDP", "CPI", "RSI",
    "MACD", "VWAP", "SMA", "EMA", "EBIT", "GAAP", "NAV", "AUM", "OTC", "NYSE", "AMEX", "FTSE",
    "DJIA", "FOMC", "FDIC", "SPAC", "REIT", "PIPE", "SPX", "DXY", "VIX", "CBOE", "FINR", "ROIC",
    "WACC", "CAGR", "DCF",
    // Reddit-isms
    "YOLO", "FOMO", "HODL", "TLDR", "ROFL", "WSB", "DD", "TA", "OTM", "ITM", "ATM", "DTE",
    "LEAPS", "FD", "APE", "APES", "DEFI", "NFT", "NFTS", "DYOR",
    // Trading verbs and nouns
    "BUY", "SELL", "HOLD", "CALL", "PUTS", "BULL", "BEAR", "PUMP", "DUMP", "MOON", "GAIN",
    "LOSS", "SHORT", "LEAP", "RISK", "BETA", "TOPS", "DIPS", "BANG", "YUGE", "BAGS", "ROPE",
    // Common abbreviations
    "USA", "USD", "EUR", "GBP", "CAD", "AUD", "JPY", "CNY", "IRS", "DOJ", "FBI", "CIA", "CDC",
    "EPA", "DOD", "DOE", "IMF", "WHO", "NATO", "OPEC", "INC", "LLC", "LTD", "CORP", "MGMT",
    "EST", "PST", "CST", "UTC", "PDF", "API", "SQL", "URL", "AWS", "APP", "APPS", "LOL", "OMG",
    "WTF", "BTW", "FYI", "TBH", "SMH", "RIP", "MVP", "GOAT", "OG", "PM", "AM", "VP",
];

/// Real tickers that are also everyday words. Blocked for bare mentions only;
/// `$GOLD` or `$AI` still count.
pub const COMMON_WORD_TICKERS: &[&str] = &[
    "ALL", "LOW", "GOLD", "AI", "OPEN", "REAL", "SAFE", "FAST", "PLAY", "NICE", "RARE", "ROCK",
    "CASH", "LAND", "PATH",
];

/// Well-known 1-2 character tickers allowed without a `$` prefix
pub const ALLOW_SHORT_TICKERS: &[&str] = &[
    "F",  // Ford
    "V",  // Visa
    "C",  // Citigroup
    "X",  // US Steel
    "T",  // AT&T
    "GE", // GE Aerospace
    "GM", // General Motors
    "BA", // Boeing
    "AA", // Alcoa
    "AG", // First Majestic Silver
    "ON", // ON Semiconductor
    "MU", // Micron
    "GS", // Goldman Sachs
    "MS", // Morgan Stanley
    "HD", // Home Depot
    "LI", // Li Auto
    "JD", // JD.com
    "HL", // Hecla Mining
    "DB", // Deutsche Bank
];
