// src/io/sink.rs

use crate::error::{SimError, SimResult};
use serde::Serialize;
use std::fmt;

/// Logical output stream. Each channel gets its own sink and header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Cost,
    Risk,
    Deviation,
}

impl Channel {
    /// Column labels: key first, then value. The value label keeps its
    /// leading space, so the header line reads `Stock, Average Cost`.
    pub fn header(&self) -> [&'static str; 2] {
        match self {
            Channel::Cost => ["Stock", " Average Cost"],
            Channel::Risk => ["Stock", " Risk Percentage"],
            Channel::Deviation => ["Iterations", " StdDeviation"],
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Channel::Cost => "CostAnalysis.csv",
            Channel::Risk => "RiskAnalysis.csv",
            Channel::Deviation => "StdDeviationPerIterations.csv",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Cost => "cost",
            Channel::Risk => "risk",
            Channel::Deviation => "deviation",
        };
        f.write_str(name)
    }
}

/// One result: stock level or trial count, and the estimate for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRow {
    pub key: u32,
    pub value: f64,
}

impl ResultRow {
    pub fn new(key: u32, value: f64) -> Self {
        Self { key, value }
    }
}

/// Destination for one channel's rows.
///
/// Rows arrive in ascending key order. `close` is called exactly once, after
/// the last row; implementations reject anything that comes after it.
pub trait RowSink {
    fn channel(&self) -> Channel;

    fn write_row(&mut self, row: &ResultRow) -> SimResult<()>;

    fn close(&mut self) -> SimResult<()>;
}

/// Keeps rows in memory.
#[derive(Debug, Clone)]
pub struct MemorySink {
    channel: Channel,
    pub rows: Vec<ResultRow>,
    closed: bool,
}

impl MemorySink {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            rows: Vec::new(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn keys(&self) -> Vec<u32> {
        self.rows.iter().map(|row| row.key).collect()
    }
}

impl RowSink for MemorySink {
    fn channel(&self) -> Channel {
        self.channel
    }

    fn write_row(&mut self, row: &ResultRow) -> SimResult<()> {
        if self.closed {
            return Err(SimError::sink(self.channel, "write after close"));
        }
        self.rows.push(*row);
        Ok(())
    }

    fn close(&mut self) -> SimResult<()> {
        if self.closed {
            return Err(SimError::sink(self.channel, "already closed"));
        }
        self.closed = true;
        Ok(())
    }
}
