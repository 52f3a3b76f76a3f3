//! Multiboot v1 header, so GRUB and `qemu -kernel` can load the image.

const MAGIC: u32 = 0x1BAD_B002;
/// Page-align modules and provide the memory map.
const FLAGS: u32 = 1 << 0 | 1 << 1;

#[repr(C, align(4))]
struct Header {
    magic: u32,
    flags: u32,
    checksum: u32,
}

#[used]
#[link_section = ".multiboot"]
static HEADER: Header = Header {
    magic: MAGIC,
    flags: FLAGS,
    checksum: 0u32.wrapping_sub(MAGIC.wrapping_add(FLAGS)),
};
