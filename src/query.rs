use static_assertions::assert_eq_size;

use crate::{
    common::Bool32,
    flags::QueryMiscFlags,
    macros::{native_enum, read_only_struct},
};

native_enum! {
    pub enum QueryType("query type") {
        Event = 0,
        Occlusion = 1,
        Timestamp = 2,
        TimestampDisjoint = 3,
        PipelineStatistics = 4,
        OcclusionPredicate = 5,
        SoStatistics = 6,
        SoOverflowPredicate = 7,
        SoStatisticsStream0 = 8,
        SoOverflowPredicateStream0 = 9,
        SoStatisticsStream1 = 10,
        SoOverflowPredicateStream1 = 11,
        SoStatisticsStream2 = 12,
        SoOverflowPredicateStream2 = 13,
        SoStatisticsStream3 = 14,
        SoOverflowPredicateStream3 = 15,
    }
}

impl QueryType {
    /// Whether the query can drive predicated rendering.
    pub fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::OcclusionPredicate
                | Self::SoOverflowPredicate
                | Self::SoOverflowPredicateStream0
                | Self::SoOverflowPredicateStream1
                | Self::SoOverflowPredicateStream2
                | Self::SoOverflowPredicateStream3
        )
    }
}

native_enum! {
    pub enum CounterType("counter type") {
        Float32 = 0,
        Uint16 = 1,
        Uint32 = 2,
        Uint64 = 3,
    }
}

/// First identifier of the driver-defined counters.
pub const COUNTER_DEVICE_DEPENDENT_0: u32 = 0x4000_0000;

/// `D3D11_QUERY_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryDesc {
    pub query: QueryType,
    pub misc_flags: QueryMiscFlags,
}

impl QueryDesc {
    pub const fn new(query: QueryType) -> Self {
        Self {
            query,
            misc_flags: QueryMiscFlags::empty(),
        }
    }

    /// A query with the predicate hint set.
    pub const fn predicate(query: QueryType) -> Self {
        Self {
            query,
            misc_flags: QueryMiscFlags::PREDICATE_HINT,
        }
    }
}

/// `D3D11_COUNTER_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CounterDesc {
    pub counter: u32,
    pub misc_flags: u32,
}

impl CounterDesc {
    pub const fn new(counter: u32) -> Self {
        Self {
            counter,
            misc_flags: 0,
        }
    }

    /// The `index`th driver-defined counter.
    pub const fn device_dependent(index: u32) -> Self {
        Self::new(COUNTER_DEVICE_DEPENDENT_0 + index)
    }
}

read_only_struct! {
    /// `D3D11_COUNTER_INFO`
    pub struct CounterInfo {
        last_device_dependent_counter: u32 => last_device_dependent_counter -> u32,
        num_simultaneous_counters: u32 => num_simultaneous_counters -> u32,
        num_detectable_parallel_units: u8 => num_detectable_parallel_units -> u8,
    }
}

impl CounterInfo {
    /// Number of driver-defined counters, zero when there are none.
    pub fn device_dependent_count(&self) -> u32 {
        self.last_device_dependent_counter
            .checked_sub(COUNTER_DEVICE_DEPENDENT_0)
            .map_or(0, |last| last + 1)
    }
}

read_only_struct! {
    /// `D3D11_QUERY_DATA_TIMESTAMP_DISJOINT`
    pub struct QueryDataTimestampDisjoint {
        frequency: u64 => frequency -> u64,
        disjoint: Bool32 => disjoint -> bool,
    }
}

assert_eq_size!(QueryDataTimestampDisjoint, [u8; 16]);

impl QueryDataTimestampDisjoint {
    /// Seconds between two timestamps, or `None` when they cannot be trusted.
    pub fn elapsed_seconds(&self, begin: u64, end: u64) -> Option<f64> {
        if self.disjoint.get() || self.frequency == 0 {
            return None;
        }
        Some(end.saturating_sub(begin) as f64 / self.frequency as f64)
    }
}

read_only_struct! {
    /// `D3D11_QUERY_DATA_PIPELINE_STATISTICS`
    pub struct QueryDataPipelineStatistics {
        ia_vertices: u64 => ia_vertices -> u64,
        ia_primitives: u64 => ia_primitives -> u64,
        vs_invocations: u64 => vs_invocations -> u64,
        gs_invocations: u64 => gs_invocations -> u64,
        gs_primitives: u64 => gs_primitives -> u64,
        c_invocations: u64 => c_invocations -> u64,
        c_primitives: u64 => c_primitives -> u64,
        ps_invocations: u64 => ps_invocations -> u64,
        hs_invocations: u64 => hs_invocations -> u64,
        ds_invocations: u64 => ds_invocations -> u64,
        cs_invocations: u64 => cs_invocations -> u64,
    }
}

assert_eq_size!(QueryDataPipelineStatistics, [u64; 11]);

read_only_struct! {
    /// `D3D11_QUERY_DATA_SO_STATISTICS`
    pub struct QueryDataSoStatistics {
        num_primitives_written: u64 => num_primitives_written -> u64,
        primitives_storage_needed: u64 => primitives_storage_needed -> u64,
    }
}

impl QueryDataSoStatistics {
    pub fn overflowed(&self) -> bool {
        self.primitives_storage_needed > self.num_primitives_written
    }
}

/// A value `GetData` writes for a finished query.
pub trait QueryData: Copy + Default {
    /// Query types whose result has this layout.
    const QUERY_TYPES: &'static [QueryType];

    fn answers(query: QueryType) -> bool {
        Self::QUERY_TYPES.contains(&query)
    }
}

impl QueryData for u64 {
    const QUERY_TYPES: &'static [QueryType] = &[QueryType::Occlusion, QueryType::Timestamp];
}

impl QueryData for Bool32 {
    const QUERY_TYPES: &'static [QueryType] = &[
        QueryType::Event,
        QueryType::OcclusionPredicate,
        QueryType::SoOverflowPredicate,
        QueryType::SoOverflowPredicateStream0,
        QueryType::SoOverflowPredicateStream1,
        QueryType::SoOverflowPredicateStream2,
        QueryType::SoOverflowPredicateStream3,
    ];
}

impl QueryData for QueryDataTimestampDisjoint {
    const QUERY_TYPES: &'static [QueryType] = &[QueryType::TimestampDisjoint];
}

impl QueryData for QueryDataPipelineStatistics {
    const QUERY_TYPES: &'static [QueryType] = &[QueryType::PipelineStatistics];
}

impl QueryData for QueryDataSoStatistics {
    const QUERY_TYPES: &'static [QueryType] = &[
        QueryType::SoStatistics,
        QueryType::SoStatisticsStream0,
        QueryType::SoStatisticsStream1,
        QueryType::SoStatisticsStream2,
        QueryType::SoStatisticsStream3,
    ];
}
