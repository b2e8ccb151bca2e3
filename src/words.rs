//! Built-in word lists for identifier and constant-name generation.
//!
//! The lists are opaque data: the generator strings terms together but never
//! interprets them. Callers can swap in their own lists through
//! [`CodeGenerator::with_wordlists`](crate::generator::CodeGenerator::with_wordlists).

/// Terms for variable, function, and type names. Systems-flavored, lower
/// case. A few digit-leading terms are present on purpose: the name
/// generator must skip them when picking a leading term.
pub const VAR_TERMS: &[&str] = &[
    "buffer", "data", "ptr", "len", "count", "index", "node", "list", "queue", "stack", "cache",
    "heap", "block", "page", "frame", "addr", "offset", "mask", "flags", "state", "status", "ctx",
    "config", "init", "read", "write", "sync", "flush", "lock", "mutex", "thread", "proc", "task",
    "event", "signal", "handler", "callback", "device", "driver", "port", "pin", "reg", "irq",
    "dma", "clock", "timer", "tick", "delay", "retry", "limit", "tmp", "val", "key", "hash",
    "seed", "byte", "word", "bit", "pool", "slab", "chunk", "slot", "entry", "table", "map",
    "tree", "root", "leaf", "next", "prev", "head", "tail", "cursor", "iter", "pos", "stream",
    "file", "path", "name", "id", "uid", "pid", "fd", "sock", "packet", "header", "payload",
    "crc", "checksum", "ack", "window", "seq", "span", "range", "scan", "probe", "watch", "poll",
    "queue_depth", "2d", "64k",
];

/// Terms for constant-macro names. Upper case by convention; the generator
/// treats them the same as any other opaque term.
pub const CONST_TERMS: &[&str] = &[
    "MAX", "MIN", "SIZE", "LEN", "COUNT", "LIMIT", "MASK", "FLAG", "MODE", "STATE", "INIT",
    "DEFAULT", "BUFFER", "CACHE", "PAGE", "BLOCK", "OFFSET", "ADDR", "BASE", "TOP", "WIDTH",
    "HEIGHT", "DEPTH", "TIMEOUT", "RETRY", "DELAY", "INTERVAL", "PERIOD", "FREQ", "RATE",
    "SCALE", "FACTOR", "RATIO", "THRESHOLD", "LEVEL", "PRIORITY", "ORDER", "INDEX", "KEY",
    "HASH", "SEED", "MAGIC", "VERSION", "MAJOR", "MINOR", "PATCH", "BUILD", "DEBUG", "TRACE",
    "ERROR", "WARN", "INFO", "OK", "FAIL", "NULL", "ENABLE", "DISABLE", "HIGH", "LOW", "FAST",
    "SLOW", "HOT", "COLD", "CTRL", "STATUS", "IRQ", "DMA", "PORT", "PIN", "REG", "CHAN", "SLOT",
];
