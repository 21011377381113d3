/*!
 * Manifest Permissions
 * Well-known Android runtime permission identifiers
 */

pub const ACCESS_COARSE_LOCATION: &str = "android.permission.ACCESS_COARSE_LOCATION";
pub const ACCESS_FINE_LOCATION: &str = "android.permission.ACCESS_FINE_LOCATION";
pub const ACCESS_BACKGROUND_LOCATION: &str = "android.permission.ACCESS_BACKGROUND_LOCATION";
pub const BLUETOOTH: &str = "android.permission.BLUETOOTH";
pub const BLUETOOTH_CONNECT: &str = "android.permission.BLUETOOTH_CONNECT";
pub const BLUETOOTH_SCAN: &str = "android.permission.BLUETOOTH_SCAN";
pub const CAMERA: &str = "android.permission.CAMERA";
pub const RECORD_AUDIO: &str = "android.permission.RECORD_AUDIO";
pub const READ_CONTACTS: &str = "android.permission.READ_CONTACTS";
pub const READ_EXTERNAL_STORAGE: &str = "android.permission.READ_EXTERNAL_STORAGE";
pub const WRITE_EXTERNAL_STORAGE: &str = "android.permission.WRITE_EXTERNAL_STORAGE";
pub const POST_NOTIFICATIONS: &str = "android.permission.POST_NOTIFICATIONS";

/// Coarse and fine location, in the order apps usually declare them
pub const LOCATION: [&str; 2] = [ACCESS_COARSE_LOCATION, ACCESS_FINE_LOCATION];

/// Short display name: the part after the last `.`
pub fn short_name(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}
