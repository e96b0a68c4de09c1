use crate::jwt::KeyMaterial;

pub const PRIVATE_PEM: &[u8] = include_bytes!("../testdata/rsa_private.pem");
pub const PUBLIC_PEM: &[u8] = include_bytes!("../testdata/rsa_public.pem");
pub const OTHER_PRIVATE_PEM: &[u8] = include_bytes!("../testdata/other_private.pem");
pub const OTHER_PUBLIC_PEM: &[u8] = include_bytes!("../testdata/other_public.pem");

pub fn key_material() -> KeyMaterial {
    KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to load test keys")
}

pub fn other_key_material() -> KeyMaterial {
    KeyMaterial::from_pem(OTHER_PRIVATE_PEM, OTHER_PUBLIC_PEM).expect("Failed to load test keys")
}
