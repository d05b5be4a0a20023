/// Decimal megabyte. Memory is reported in MB, not MiB.
pub const BYTES_PER_MEGABYTE: u64 = 1_000_000;

/// Raw counters from a single stats response.
///
/// The engine ships the current CPU reading together with the trailing one it took before
/// (`precpu`), so both halves of the delta come from the same response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatsSample {
    /// Cumulative CPU time consumed by the container (current reading).
    pub cpu_total_usage: u64,
    /// Cumulative CPU time consumed by the container (previous reading).
    pub precpu_total_usage: u64,
    /// Cumulative host CPU time (current reading).
    pub system_usage: u64,
    /// Cumulative host CPU time (previous reading).
    pub presystem_usage: u64,
    /// Number of CPUs the engine considers online. `0` if not reported.
    pub online_cpus: u64,
    pub per_cpu_usage: Vec<u64>,
    pub memory_usage_bytes: u64,
}

impl RawStatsSample {
    /// CPU time the container consumed between the two readings. May be negative if the
    /// counters were reset.
    pub fn cpu_delta(&self) -> f64 {
        self.cpu_total_usage as f64 - self.precpu_total_usage as f64
    }

    /// Host CPU time elapsed between the two readings.
    pub fn system_delta(&self) -> f64 {
        self.system_usage as f64 - self.presystem_usage as f64
    }

    /// Online CPU count, falling back to the number of per-CPU entries.
    pub fn number_of_cpus(&self) -> u64 {
        if self.online_cpus > 0 {
            self.online_cpus
        } else {
            self.per_cpu_usage.len() as u64
        }
    }

    /// CPU utilization in percent, where `100.0` is one fully used CPU.
    ///
    /// Returns `0.0` unless both deltas are positive, e.g. for a container that just started
    /// or whose previous reading is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dockdash::metrics::RawStatsSample;
    /// let sample = RawStatsSample {
    ///     cpu_total_usage: 120,
    ///     precpu_total_usage: 100,
    ///     system_usage: 1_100,
    ///     presystem_usage: 1_000,
    ///     online_cpus: 4,
    ///     ..Default::default()
    /// };
    /// assert_eq!(sample.cpu_percent(), 80.0);
    /// ```
    pub fn cpu_percent(&self) -> f64 {
        let cpu_delta = self.cpu_delta();
        let system_delta = self.system_delta();
        if system_delta > 0.0 && cpu_delta > 0.0 {
            (cpu_delta / system_delta) * self.number_of_cpus() as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Memory usage in whole decimal megabytes, truncated.
    pub fn memory_usage_mb(&self) -> u64 {
        self.memory_usage_bytes / BYTES_PER_MEGABYTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cpu: (u64, u64), system: (u64, u64), online_cpus: u64) -> RawStatsSample {
        RawStatsSample {
            cpu_total_usage: cpu.1,
            precpu_total_usage: cpu.0,
            system_usage: system.1,
            presystem_usage: system.0,
            online_cpus,
            ..Default::default()
        }
    }

    #[test]
    fn test_cpu_percent_formula() {
        let stats = sample((1_000, 1_020), (50_000, 50_100), 4);
        assert_eq!(stats.cpu_delta(), 20.0);
        assert_eq!(stats.system_delta(), 100.0);
        assert_eq!(stats.cpu_percent(), 80.0);
    }

    #[test]
    fn test_cpu_percent_zero_for_degenerate_deltas() {
        // no system time elapsed
        assert_eq!(sample((0, 20), (100, 100), 4).cpu_percent(), 0.0);
        // system counter went backwards
        assert_eq!(sample((0, 20), (200, 100), 4).cpu_percent(), 0.0);
        // idle container
        assert_eq!(sample((20, 20), (0, 100), 4).cpu_percent(), 0.0);
        // cpu counter reset
        assert_eq!(sample((50, 20), (0, 100), 4).cpu_percent(), 0.0);
        // first sample, no previous reading
        assert_eq!(sample((0, 0), (0, 0), 0).cpu_percent(), 0.0);
    }

    #[test]
    fn test_number_of_cpus_prefers_online_cpus() {
        let stats = RawStatsSample {
            online_cpus: 2,
            per_cpu_usage: vec![1; 8],
            ..Default::default()
        };
        assert_eq!(stats.number_of_cpus(), 2);
    }

    #[test]
    fn test_number_of_cpus_falls_back_to_per_cpu_entries() {
        let stats = RawStatsSample {
            online_cpus: 0,
            per_cpu_usage: vec![10, 20, 30, 40, 50, 60, 70, 80],
            ..Default::default()
        };
        assert_eq!(stats.number_of_cpus(), 8);
    }

    #[test]
    fn test_cpu_percent_uses_per_cpu_fallback() {
        let stats = RawStatsSample {
            per_cpu_usage: vec![0; 8],
            ..sample((0, 50), (0, 100), 0)
        };
        assert_eq!(stats.cpu_percent(), 400.0);
    }

    #[test]
    fn test_cpu_percent_without_any_cpu_count() {
        let stats = sample((0, 50), (0, 100), 0);
        assert_eq!(stats.cpu_percent(), 0.0);
    }

    #[test]
    fn test_memory_usage_is_truncated_decimal_megabytes() {
        let mut stats = RawStatsSample {
            memory_usage_bytes: 2_500_000,
            ..Default::default()
        };
        assert_eq!(stats.memory_usage_mb(), 2);

        stats.memory_usage_bytes = 999_999;
        assert_eq!(stats.memory_usage_mb(), 0);

        // 1 GiB is 1073 MB, not 1024
        stats.memory_usage_bytes = 1 << 30;
        assert_eq!(stats.memory_usage_mb(), 1073);
    }
}
