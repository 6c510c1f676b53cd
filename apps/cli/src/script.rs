//! Step scripts for `poolkit run`
//!
//! Each step is one shell argument such as `insert:7` or `after:7:8`. List
//! steps address anchor nodes by value (first match).

use std::fmt;
use std::str::FromStr;

use poolkit_list::{ListError, ListResult, PoolList};
use poolkit_memory::{Location, PoolAllocator, PoolConfig};

/// One scripted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Insert(u16),
    After { anchor: u16, value: u16 },
    Before { anchor: u16, value: u16 },
    Delete(u16),
    Search(u16),
    Count,
    Values,
    Alloc(usize),
    Free(usize),
    Status,
    Teardown,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(':').collect();
        let step = match parts.as_slice() {
            ["insert", value] => Self::Insert(parse_value(value)?),
            ["after", anchor, value] => Self::After {
                anchor: parse_value(anchor)?,
                value: parse_value(value)?,
            },
            ["before", anchor, value] => Self::Before {
                anchor: parse_value(anchor)?,
                value: parse_value(value)?,
            },
            ["delete", value] => Self::Delete(parse_value(value)?),
            ["search", value] => Self::Search(parse_value(value)?),
            ["count"] => Self::Count,
            ["values"] => Self::Values,
            ["alloc", size] => Self::Alloc(parse_offset(size)?),
            ["free", offset] => Self::Free(parse_offset(offset)?),
            ["status"] => Self::Status,
            ["teardown"] => Self::Teardown,
            _ => return Err(format!("unknown step `{input}`")),
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(value) => write!(f, "insert:{value}"),
            Self::After { anchor, value } => write!(f, "after:{anchor}:{value}"),
            Self::Before { anchor, value } => write!(f, "before:{anchor}:{value}"),
            Self::Delete(value) => write!(f, "delete:{value}"),
            Self::Search(value) => write!(f, "search:{value}"),
            Self::Count => f.write_str("count"),
            Self::Values => f.write_str("values"),
            Self::Alloc(size) => write!(f, "alloc:{size}"),
            Self::Free(offset) => write!(f, "free:{offset}"),
            Self::Status => f.write_str("status"),
            Self::Teardown => f.write_str("teardown"),
        }
    }
}

fn parse_value(raw: &str) -> Result<u16, String> {
    raw.parse()
        .map_err(|_| format!("`{raw}` is not a value between 0 and {}", u16::MAX))
}

/// Decimal, or hex with a `0x` prefix
fn parse_offset(raw: &str) -> Result<usize, String> {
    let parsed = match raw.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|_| format!("`{raw}` is not a byte count or offset"))
}

/// One pool plus one list living in it
#[derive(Debug)]
pub struct Session {
    pool: PoolAllocator,
    list: PoolList,
}

impl Session {
    /// Initialize a pool of `capacity` bytes with an empty list
    pub fn start(capacity: usize, config: PoolConfig) -> ListResult<Self> {
        let mut pool = PoolAllocator::new(config);
        let list = PoolList::init(&mut pool, capacity)?;
        Ok(Self { pool, list })
    }

    /// Run one step and describe its result in a single line
    pub fn execute(&mut self, step: Step) -> ListResult<String> {
        let pool = &mut self.pool;
        let list = &mut self.list;

        let line = match step {
            Step::Insert(value) => {
                let node = list.insert(pool, value)?;
                format!("inserted {value} at {node}")
            }
            Step::After { anchor, value } => {
                let anchor_node = find(list, pool, anchor)?;
                let node = list.insert_after(pool, Some(anchor_node), value)?;
                format!("inserted {value} after {anchor} at {node}")
            }
            Step::Before { anchor, value } => {
                let anchor_node = find(list, pool, anchor)?;
                let node = list.insert_before(pool, Some(anchor_node), value)?;
                format!("inserted {value} before {anchor} at {node}")
            }
            Step::Delete(value) => {
                list.delete(pool, value)?;
                format!("deleted {value}")
            }
            Step::Search(value) => match list.search(pool, value)? {
                Some(node) => format!("found {value} at {node}"),
                None => format!("{value} not found"),
            },
            Step::Count => format!("count: {}", list.count(pool)?),
            Step::Values => {
                let values: Vec<String> = list
                    .values(pool)?
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                format!("[{}]", values.join(", "))
            }
            Step::Alloc(size) => {
                let location = pool.alloc(size)?;
                format!("allocated {size} bytes at {location}")
            }
            Step::Free(offset) => {
                let location = Location::new(offset);
                pool.free(location)?;
                format!("freed {location}")
            }
            Step::Status => {
                let status = pool.status()?;
                format!(
                    "capacity: {}, allocated: {}, free: {}, blocks: {}, largest free: {}",
                    status.capacity,
                    status.allocated_bytes(),
                    status.free_bytes(),
                    status.blocks.len(),
                    pool.largest_free_block()
                )
            }
            Step::Teardown => {
                list.teardown(pool)?;
                "teardown complete".to_string()
            }
        };

        tracing::debug!(%step, %line, "step executed");
        Ok(line)
    }

    /// Allocator behind the session
    pub fn pool(&self) -> &PoolAllocator {
        &self.pool
    }
}

fn find(list: &PoolList, pool: &PoolAllocator, value: u16) -> ListResult<poolkit_list::NodeHandle> {
    list.search(pool, value)?
        .ok_or(ListError::NotFound { value })
}
