//! Platform memory probes.
//!
//! A [`MemoryProbe`] reads the peak memory footprint of the current process.
//! Each supported target has its own implementation and [`PlatformProbe`]
//! names the one selected at build time:
//!
//! - macOS: [`TaskInfoProbe`] queries the kernel's task VM info for the
//!   peak physical footprint ledger.
//! - Linux: [`ProcStatusProbe`] reads `VmPeak` from `/proc/self/status`.
//! - anything else: [`UnsupportedProbe`] always fails.
//!
//! Probes are one-shot and best-effort. Their errors are typed so callers can
//! log them, but a failing probe is never fatal.

use crate::error::ProbeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the platform this crate was built for, as written into reports.
#[cfg(target_os = "macos")]
pub const PLATFORM_NAME: &str = "macOS";

/// Name of the platform this crate was built for, as written into reports.
#[cfg(target_os = "linux")]
pub const PLATFORM_NAME: &str = "Linux";

/// Name of the platform this crate was built for, as written into reports.
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub const PLATFORM_NAME: &str = "unsupported";

/// The memory probe for the current build target.
#[cfg(target_os = "macos")]
pub type PlatformProbe = TaskInfoProbe;

/// The memory probe for the current build target.
#[cfg(target_os = "linux")]
pub type PlatformProbe = ProcStatusProbe;

/// The memory probe for the current build target.
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub type PlatformProbe = UnsupportedProbe;

/// Reads the peak memory footprint of the current process.
#[cfg_attr(test, mockall::automock)]
pub trait MemoryProbe {
    /// Peak memory footprint in bytes.
    fn peak_memory_footprint(&self) -> Result<u64, ProbeError>;
}

/// Probe for targets without a memory counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl MemoryProbe for UnsupportedProbe {
    fn peak_memory_footprint(&self) -> Result<u64, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}

/// Default location of the process status pseudo-file.
pub const PROC_STATUS_PATH: &str = "/proc/self/status";

/// Line tag of the peak virtual memory size, in kibibytes.
const PEAK_TAG: &str = "VmPeak:";

/// Probe that reads the peak memory line of a proc status file.
#[derive(Debug, Clone)]
pub struct ProcStatusProbe {
    path: PathBuf,
}

impl ProcStatusProbe {
    /// Probe reading `/proc/self/status`.
    pub fn new() -> Self {
        Self::with_path(PROC_STATUS_PATH)
    }

    /// Probe reading a status file at another path.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this probe reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcStatusProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcStatusProbe {
    fn peak_memory_footprint(&self) -> Result<u64, ProbeError> {
        let status = fs::read_to_string(&self.path)?;
        let kib = parse_peak_kib(&status)?;
        kib.checked_mul(1024)
            .ok_or_else(|| ProbeError::Parse(format!("{kib} KiB overflows a byte count")))
    }
}

/// Extract the `VmPeak` value, in kibibytes, from proc status text.
pub fn parse_peak_kib(status: &str) -> Result<u64, ProbeError> {
    let line = status
        .lines()
        .find(|line| line.starts_with(PEAK_TAG))
        .ok_or(ProbeError::MissingField(PEAK_TAG))?;

    let digits: String = line[PEAK_TAG.len()..]
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    digits
        .parse()
        .map_err(|_| ProbeError::Parse(line.trim().to_string()))
}

#[cfg(target_os = "macos")]
pub use self::mach::TaskInfoProbe;

#[cfg(target_os = "macos")]
#[allow(unsafe_code)]
mod mach {
    use super::MemoryProbe;
    use crate::error::ProbeError;
    use std::mem;

    extern "C" {
        fn mach_task_self() -> u32;
        fn task_info(
            target_task: u32,
            flavor: i32,
            task_info_out: *mut i32,
            task_info_out_count: *mut u32,
        ) -> i32;
    }

    const KERN_SUCCESS: i32 = 0;
    const TASK_VM_INFO: i32 = 22;

    /// `task_vm_info_data_t` up to revision 5.
    #[allow(dead_code)]
    #[repr(C, packed(4))]
    struct TaskVmInfo {
        virtual_size: u64,
        region_count: i32,
        page_size: i32,
        resident_size: u64,
        resident_size_peak: u64,
        device: u64,
        device_peak: u64,
        internal: u64,
        internal_peak: u64,
        external: u64,
        external_peak: u64,
        reusable: u64,
        reusable_peak: u64,
        purgeable_volatile_pmap: u64,
        purgeable_volatile_resident: u64,
        purgeable_volatile_virtual: u64,
        compressed: u64,
        compressed_peak: u64,
        compressed_lifetime: u64,
        phys_footprint: u64,
        min_address: u64,
        max_address: u64,
        ledger_phys_footprint_peak: i64,
        ledger_purgeable_nonvolatile: i64,
        ledger_purgeable_novolatile_compressed: i64,
        ledger_purgeable_volatile: i64,
        ledger_purgeable_volatile_compressed: i64,
        ledger_tag_network_nonvolatile: i64,
        ledger_tag_network_nonvolatile_compressed: i64,
        ledger_tag_network_volatile: i64,
        ledger_tag_network_volatile_compressed: i64,
        ledger_tag_media_footprint: i64,
        ledger_tag_media_footprint_compressed: i64,
        ledger_tag_media_nofootprint: i64,
        ledger_tag_media_nofootprint_compressed: i64,
        ledger_tag_graphics_footprint: i64,
        ledger_tag_graphics_footprint_compressed: i64,
        ledger_tag_graphics_nofootprint: i64,
        ledger_tag_graphics_nofootprint_compressed: i64,
        ledger_tag_neural_footprint: i64,
        ledger_tag_neural_footprint_compressed: i64,
        ledger_tag_neural_nofootprint: i64,
        ledger_tag_neural_nofootprint_compressed: i64,
        limit_bytes_remaining: u64,
        decompressions: i32,
    }

    const TASK_VM_INFO_COUNT: u32 = (mem::size_of::<TaskVmInfo>() / mem::size_of::<u32>()) as u32;

    // Revision 3 adds the ledgers; the kernel only fills them when the caller's
    // buffer is at least this long.
    const TASK_VM_INFO_REV3_COUNT: u32 = TASK_VM_INFO_COUNT - 3;

    /// Probe that reads the peak physical footprint ledger of this task.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TaskInfoProbe;

    impl MemoryProbe for TaskInfoProbe {
        fn peak_memory_footprint(&self) -> Result<u64, ProbeError> {
            let mut info: TaskVmInfo = unsafe { mem::zeroed() };
            let mut count = TASK_VM_INFO_COUNT;

            let status = unsafe {
                task_info(
                    mach_task_self(),
                    TASK_VM_INFO,
                    &mut info as *mut TaskVmInfo as *mut i32,
                    &mut count,
                )
            };

            if status != KERN_SUCCESS {
                return Err(ProbeError::Kernel { code: status });
            }
            if count < TASK_VM_INFO_REV3_COUNT {
                return Err(ProbeError::MissingField("ledger_phys_footprint_peak"));
            }

            let peak = info.ledger_phys_footprint_peak;
            u64::try_from(peak).map_err(|_| ProbeError::Parse(format!("negative footprint {peak}")))
        }
    }
}
