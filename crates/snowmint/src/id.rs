use core::{fmt, time::Duration};

/// A 64-bit Snowflake ID with a split center/worker identity.
///
/// - 1 bit reserved (always zero, so the ID is a non-negative `i64`)
/// - 41 bits timestamp (ms since the generator's epoch)
/// - 5 bits center ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21           17 16           12 11             0
///              +--------------+----------------+---------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | center ID (5) | worker ID (5) | sequence (12) |
///              +--------------+----------------+---------------+---------------+---------------+
///              |<------------------ MSB ------------- 64 bits ------------- LSB ------------------>|
/// ```
///
/// Ordering on the raw integer is ordering by creation time, then identity,
/// then sequence.
///
/// # Example
///
/// ```
/// use snowmint::SnowflakeId;
///
/// let id = SnowflakeId::from(1000, 3, 7, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.center_id(), 3);
/// assert_eq!(id.worker_id(), 7);
/// assert_eq!(id.sequence(), 1);
/// assert_eq!(id.to_i64(), (1000 << 22) | (3 << 17) | (7 << 12) | 1);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit center ID field. Occupies bits 17
    /// through 21.
    pub const CENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Shift past worker, center and sequence (5 + 5 + 12).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Shift past worker and sequence (5 + 12).
    pub const CENTER_ID_SHIFT: u64 = 17;

    /// Shift past sequence.
    pub const WORKER_ID_SHIFT: u64 = 12;

    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields, masking each one to its width.
    pub const fn from(timestamp: u64, center_id: u64, worker_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let center_id = (center_id & Self::CENTER_ID_MASK) << Self::CENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | center_id | worker_id | sequence,
        }
    }

    /// Constructs a new ID from its components.
    ///
    /// Unlike [`Self::from`], an out-of-range field is a logic error and trips
    /// a debug assertion instead of being masked.
    pub fn from_components(timestamp: u64, center_id: u64, worker_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(center_id <= Self::CENTER_ID_MASK, "center_id overflow");
        debug_assert!(worker_id <= Self::WORKER_ID_MASK, "worker_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        Self::from(timestamp, center_id, worker_id, sequence)
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns the ID as a signed 64-bit integer.
    ///
    /// IDs built through the generator never set the reserved bit, so the
    /// result is non-negative.
    pub const fn to_i64(&self) -> i64 {
        self.id as i64
    }

    /// Extracts the timestamp (ms since epoch) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the center ID from the packed ID.
    pub const fn center_id(&self) -> u64 {
        (self.id >> Self::CENTER_ID_SHIFT) & Self::CENTER_ID_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    pub const fn max_center_id() -> u64 {
        Self::CENTER_ID_MASK
    }

    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns the creation time in milliseconds since the Unix epoch, given
    /// the epoch the ID was generated against.
    pub const fn unix_millis(&self, epoch: Duration) -> u64 {
        self.timestamp() + epoch.as_millis() as u64
    }

    /// Returns true if the current sequence value can be incremented.
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented.
    pub fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.center_id(),
            self.worker_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with sequence reset to zero.
    pub fn rollover_to_timestamp(&self, timestamp: u64) -> Self {
        Self::from_components(timestamp, self.center_id(), self.worker_id(), 0)
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }

    fn fields(&self) -> [(&'static str, u8, u64); 5] {
        [
            ("reserved", 1, self.id >> 63),
            ("timestamp", 41, self.timestamp()),
            ("center_id", 5, self.center_id()),
            ("worker_id", 5, self.worker_id()),
            ("sequence", 12, self.sequence()),
        ]
    }
}

impl From<SnowflakeId> for u64 {
    fn from(value: SnowflakeId) -> Self {
        value.to_raw()
    }
}

impl From<SnowflakeId> for i64 {
    fn from(value: SnowflakeId) -> Self {
        value.to_i64()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();

        // widest of label, decimal and hex per column, plus padding
        let widths = fields.map(|(name, bits, value)| {
            let label = format!("{name} ({bits})").len();
            let dec = value.to_string().len();
            let hex = format!("0x{value:x}").len();
            label.max(dec).max(hex) + 2
        });

        writeln!(f, "SnowflakeId {{")?;
        writeln!(f, "    raw id     : 0x{:016x} ({})", self.id, self.id)?;
        writeln!(f, "    padded     : {}", self.to_padded_string())?;
        writeln!(f, "    layout     :")?;
        write_border(f, &widths)?;
        write_row(f, &widths, fields.map(|(name, bits, _)| format!("{name} ({bits})")))?;
        write_border(f, &widths)?;
        write_row(f, &widths, fields.map(|(_, _, value)| value.to_string()))?;
        write_row(f, &widths, fields.map(|(_, _, value)| format!("0x{value:x}")))?;
        write_border(f, &widths)?;
        write!(f, "}}")
    }
}

fn write_border(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    write!(f, "        +")?;
    for &w in widths {
        write!(f, "{}+", "-".repeat(w))?;
    }
    writeln!(f)
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: [String; 5]) -> fmt::Result {
    write!(f, "        |")?;
    for (cell, &w) in cells.iter().zip(widths) {
        write!(f, "{cell:^w$}|")?;
    }
    writeln!(f)
}
