//! Property ID namespace.
//!
//! IDs are opaque integer keys. By convention the space is split into bands per
//! subsystem; the store never enforces uniqueness or band membership.

/// Key of a property within a list.
pub type PropertyId = i32;

/// Temporary directory inside the guest.
pub const VM_GUEST_TEMP_DIR: PropertyId = 203;

// VMX properties.
pub const VMX_VERSION: PropertyId = 4400;
pub const VMX_PRODUCT_NAME: PropertyId = 4401;
pub const VMX_VIX_FEATURES: PropertyId = 4402;

// Guest OS and tools properties.
pub const GUEST_TOOLS_VERSION: PropertyId = 4500;
pub const GUEST_TOOLS_API_OPTIONS: PropertyId = 4501;
pub const GUEST_OS_FAMILY: PropertyId = 4502;
pub const GUEST_OS_VERSION: PropertyId = 4503;
pub const GUEST_OS_PACKAGE_LIST: PropertyId = 4504;
pub const GUEST_NAME: PropertyId = 4505;
pub const GUEST_POWER_OFF_SCRIPT: PropertyId = 4506;
pub const GUEST_POWER_ON_SCRIPT: PropertyId = 4507;
pub const GUEST_RESUME_SCRIPT: PropertyId = 4508;
pub const GUEST_SUSPEND_SCRIPT: PropertyId = 4509;
pub const GUEST_TOOLS_PRODUCT_NAME: PropertyId = 4511;
pub const FOREIGN_VM_TOOLS_VERSION: PropertyId = 4512;
pub const VM_DHCP_ENABLED: PropertyId = 4513;
pub const VM_IP_ADDRESS: PropertyId = 4514;
pub const VM_SUBNET_MASK: PropertyId = 4515;
pub const VM_DEFAULT_GATEWAY: PropertyId = 4516;
pub const VM_DNS_SERVER_DHCP_ENABLED: PropertyId = 4517;
pub const VM_DNS_SERVER: PropertyId = 4518;
pub const GUEST_TOOLS_WORD_SIZE: PropertyId = 4519;
pub const GUEST_OS_VERSION_SHORT: PropertyId = 4520;

/// Tools version string reported by VMs not running VMware tools.
pub const FOREIGN_VM_TOOLS_VMX_VERSION_STRING: &str = "Foreign VM Tools";
