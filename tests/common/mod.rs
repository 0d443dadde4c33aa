use std::sync::{LazyLock, Mutex};

use dynamic_connectivity::AggregatedData;
use flexi_logger::{Logger, LoggerHandle};

pub mod slow_lists;

/// Sum of i32 values, the simplest useful annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggSum(pub i32);

impl AggregatedData for AggSum {
    type Data = i32;

    fn from(data: &Self::Data) -> Self {
        Self(*data)
    }

    fn merge(self, right: Self) -> Self {
        Self(self.0 + right.0)
    }
}

impl PartialEq<i32> for AggSum {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Decimal concatenation of single digits. Not commutative, which makes it
/// catch in-order mistakes sums cannot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggDigit {
    pub value: u64,
    digits: u32,
}

impl AggregatedData for AggDigit {
    type Data = i32;

    fn from(data: &Self::Data) -> Self {
        Self {
            value: *data as u64,
            digits: 1,
        }
    }

    fn merge(self, right: Self) -> Self {
        Self {
            value: self.value * 10u64.pow(right.digits) + right.value,
            digits: self.digits + right.digits,
        }
    }
}

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .format(|w, now, record| {
                write!(
                    w,
                    "{} [{}] {}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Turn on trace logging from this point on, to zoom into a failing query.
#[allow(dead_code)]
pub fn log_traces() {
    LOGGER
        .lock()
        .unwrap()
        .parse_and_push_temp_spec("trace")
        .unwrap();
}
