//! Device hierarchy data model.
//!
//! Mirrors the XInput2 hierarchy-change payload: a notification carries an
//! ordered list of per-device entries, each with a bitmask of what changed
//! and the device's role in the input topology.

/// Hierarchy change flags (values match the XInput2 protocol).
pub const MASTER_ADDED: i32 = 1 << 0;
pub const MASTER_REMOVED: i32 = 1 << 1;
pub const SLAVE_ADDED: i32 = 1 << 2;
pub const SLAVE_REMOVED: i32 = 1 << 3;
pub const SLAVE_ATTACHED: i32 = 1 << 4;
pub const SLAVE_DETACHED: i32 = 1 << 5;
pub const DEVICE_ENABLED: i32 = 1 << 6;
pub const DEVICE_DISABLED: i32 = 1 << 7;

/// Flags that carry an actionable enable/disable signal.
pub const MASK_ENABLE_DISABLE: i32 = DEVICE_ENABLED | DEVICE_DISABLED;

/// Role of a device within the input topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceUse {
    MasterPointer,
    MasterKeyboard,
    SlavePointer,
    SlaveKeyboard,
    FloatingSlave,
    /// A use value outside the known protocol range.
    Unknown(i32),
}

impl DeviceUse {
    /// Create a DeviceUse from the raw protocol value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => DeviceUse::MasterPointer,
            2 => DeviceUse::MasterKeyboard,
            3 => DeviceUse::SlavePointer,
            4 => DeviceUse::SlaveKeyboard,
            5 => DeviceUse::FloatingSlave,
            n => DeviceUse::Unknown(n),
        }
    }

    /// Report name for this use class.
    pub fn name(&self) -> &'static str {
        match self {
            DeviceUse::MasterPointer => "MasterPointer",
            DeviceUse::MasterKeyboard => "MasterKeyboard",
            DeviceUse::SlavePointer => "SlavePointer",
            DeviceUse::SlaveKeyboard => "SlaveKeyboard",
            DeviceUse::FloatingSlave => "FloatingSlave",
            DeviceUse::Unknown(_) => "UnknownDeviceType",
        }
    }
}

/// Report name for a raw hierarchy flags value.
///
/// Only single-bit values have a name; anything else, including a
/// combination of known bits, renders as `UnknownHierarchyFlag`.
pub fn flag_name(flags: i32) -> &'static str {
    match flags {
        MASTER_ADDED => "MasterAdded",
        MASTER_REMOVED => "MasterRemoved",
        SLAVE_ADDED => "SlaveAdded",
        SLAVE_REMOVED => "SlaveRemoved",
        SLAVE_ATTACHED => "SlaveAttached",
        SLAVE_DETACHED => "SlaveDetached",
        DEVICE_ENABLED => "DeviceEnabled",
        DEVICE_DISABLED => "DeviceDisabled",
        _ => "UnknownHierarchyFlag",
    }
}

/// One entry within a hierarchy notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHierarchyInfo {
    /// Server-side device id.
    pub device_id: i32,
    /// Bitmask of hierarchy change flags.
    pub flags: i32,
    /// Role of the device.
    pub device_use: DeviceUse,
}

impl DeviceHierarchyInfo {
    pub fn new(device_id: i32, flags: i32, device_use: DeviceUse) -> Self {
        Self {
            device_id,
            flags,
            device_use,
        }
    }

    /// Check if this entry reports a device being enabled or disabled.
    #[inline]
    pub fn is_enable_or_disable(&self) -> bool {
        (self.flags & MASK_ENABLE_DISABLE) != 0
    }
}

/// A decoded hierarchy-change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyNotification {
    /// Entries in the order the server sent them.
    pub info: Vec<DeviceHierarchyInfo>,
}

impl HierarchyNotification {
    pub fn new(info: Vec<DeviceHierarchyInfo>) -> Self {
        Self { info }
    }
}

/// A record ready to be reported: the flag name and the device use name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub flag_name: &'static str,
    pub device_use_name: &'static str,
}

impl ClassifiedRecord {
    /// Build a record from a hierarchy entry using the total name mappings.
    pub fn from_info(info: &DeviceHierarchyInfo) -> Self {
        Self {
            flag_name: flag_name(info.flags),
            device_use_name: info.device_use.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_use_from_raw() {
        assert_eq!(DeviceUse::from_raw(1), DeviceUse::MasterPointer);
        assert_eq!(DeviceUse::from_raw(2), DeviceUse::MasterKeyboard);
        assert_eq!(DeviceUse::from_raw(3), DeviceUse::SlavePointer);
        assert_eq!(DeviceUse::from_raw(4), DeviceUse::SlaveKeyboard);
        assert_eq!(DeviceUse::from_raw(5), DeviceUse::FloatingSlave);
        assert_eq!(DeviceUse::from_raw(0), DeviceUse::Unknown(0));
        assert_eq!(DeviceUse::from_raw(42), DeviceUse::Unknown(42));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(DeviceUse::from_raw(-1).name(), "UnknownDeviceType");
        assert_eq!(flag_name(0), "UnknownHierarchyFlag");
        assert_eq!(flag_name(1 << 12), "UnknownHierarchyFlag");
        assert_eq!(
            flag_name(SLAVE_ADDED | DEVICE_ENABLED),
            "UnknownHierarchyFlag"
        );
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(flag_name(DEVICE_ENABLED), "DeviceEnabled");
        assert_eq!(flag_name(DEVICE_DISABLED), "DeviceDisabled");
        assert_eq!(flag_name(SLAVE_ATTACHED), "SlaveAttached");
        assert_eq!(flag_name(MASTER_REMOVED), "MasterRemoved");
    }

    #[test]
    fn test_enable_disable_filter() {
        let enabled = DeviceHierarchyInfo::new(9, DEVICE_ENABLED, DeviceUse::SlaveKeyboard);
        let attached = DeviceHierarchyInfo::new(9, SLAVE_ATTACHED, DeviceUse::SlaveKeyboard);
        let mixed = DeviceHierarchyInfo::new(
            9,
            SLAVE_REMOVED | DEVICE_DISABLED,
            DeviceUse::SlavePointer,
        );

        assert!(enabled.is_enable_or_disable());
        assert!(!attached.is_enable_or_disable());
        assert!(mixed.is_enable_or_disable());
    }
}
