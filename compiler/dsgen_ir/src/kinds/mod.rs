//! Static catalog of numeric storage kinds.
//!
//! Every dispatch branch the generator emits corresponds to exactly one
//! [`KindDescriptor`]. The tables are immutable and shared by all expansions.

/// Parameter letters run `a..=z`.
pub const MAX_PARAMETERS: usize = 26;

/// A group of storage kinds expanded together by one code block.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum KindFamily {
    Integer,
    CompoundInteger,
    Real,
    CompoundReal,
    Complex,
}

impl KindFamily {
    /// The concrete kinds of this family, narrowest first.
    pub fn kinds(self) -> &'static [KindDescriptor] {
        match self {
            KindFamily::Integer => &INTEGER_KINDS,
            KindFamily::CompoundInteger => &COMPOUND_INTEGER_KINDS,
            KindFamily::Real => &REAL_KINDS,
            KindFamily::CompoundReal => &COMPOUND_REAL_KINDS,
            KindFamily::Complex => &COMPLEX_KINDS,
        }
    }

    /// Name used in the "supports ... datasets only" message.
    pub fn coverage_name(self) -> &'static str {
        match self {
            KindFamily::Integer => "integer",
            KindFamily::CompoundInteger => "compound integer",
            KindFamily::Real => "real",
            KindFamily::CompoundReal => "compound real",
            KindFamily::Complex => "complex",
        }
    }

    /// Letter(s) naming the output buffer local, e.g. `ai` in `oai16data`.
    pub fn storage_letter(self) -> &'static str {
        match self {
            KindFamily::Integer => "i",
            KindFamily::CompoundInteger => "ai",
            KindFamily::Real => "f",
            KindFamily::CompoundReal => "af",
            KindFamily::Complex => "c",
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, KindFamily::Integer | KindFamily::CompoundInteger)
    }

    #[inline]
    pub fn is_compound(self) -> bool {
        matches!(self, KindFamily::CompoundInteger | KindFamily::CompoundReal)
    }
}

/// One concrete numeric storage kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct KindDescriptor {
    /// Dataset type constant, e.g. `INT16` or `ARRAYFLOAT64`.
    pub tag: &'static str,
    pub family: KindFamily,
    /// Width of one item. Complex kinds count both lanes.
    pub bit_width: u32,
    /// Primitive type of the backing array.
    pub storage_element_type: &'static str,
    /// Dataset class holding the backing array.
    pub class_name: &'static str,
    pub is_compound: bool,
    /// Width of each real/imaginary lane, complex kinds only.
    pub complex_part_width: Option<u32>,
}

impl KindDescriptor {
    const fn new(
        tag: &'static str,
        family: KindFamily,
        bit_width: u32,
        storage_element_type: &'static str,
        class_name: &'static str,
    ) -> Self {
        KindDescriptor {
            tag,
            family,
            bit_width,
            storage_element_type,
            class_name,
            is_compound: matches!(
                family,
                KindFamily::CompoundInteger | KindFamily::CompoundReal
            ),
            complex_part_width: if matches!(family, KindFamily::Complex) {
                Some(bit_width / 2)
            } else {
                None
            },
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.family.is_integer()
    }

    /// Name of the local holding the output buffer, e.g. `oi32data`.
    pub fn output_var(&self) -> String {
        format!("o{}{}data", self.family.storage_letter(), self.bit_width)
    }

    /// All-ones literal over this kind's width, e.g. `0xffffL` for 16 bits.
    pub fn unsigned_mask(&self) -> String {
        let digits = (self.bit_width / 4) as usize;
        format!("0x{}L", "f".repeat(digits))
    }
}

static INTEGER_KINDS: [KindDescriptor; 4] = [
    KindDescriptor::new("INT8", KindFamily::Integer, 8, "byte", "ByteDataset"),
    KindDescriptor::new("INT16", KindFamily::Integer, 16, "short", "ShortDataset"),
    KindDescriptor::new("INT32", KindFamily::Integer, 32, "int", "IntegerDataset"),
    KindDescriptor::new("INT64", KindFamily::Integer, 64, "long", "LongDataset"),
];

static COMPOUND_INTEGER_KINDS: [KindDescriptor; 4] = [
    KindDescriptor::new(
        "ARRAYINT8",
        KindFamily::CompoundInteger,
        8,
        "byte",
        "CompoundByteDataset",
    ),
    KindDescriptor::new(
        "ARRAYINT16",
        KindFamily::CompoundInteger,
        16,
        "short",
        "CompoundShortDataset",
    ),
    KindDescriptor::new(
        "ARRAYINT32",
        KindFamily::CompoundInteger,
        32,
        "int",
        "CompoundIntegerDataset",
    ),
    KindDescriptor::new(
        "ARRAYINT64",
        KindFamily::CompoundInteger,
        64,
        "long",
        "CompoundLongDataset",
    ),
];

static REAL_KINDS: [KindDescriptor; 2] = [
    KindDescriptor::new("FLOAT32", KindFamily::Real, 32, "float", "FloatDataset"),
    KindDescriptor::new("FLOAT64", KindFamily::Real, 64, "double", "DoubleDataset"),
];

static COMPOUND_REAL_KINDS: [KindDescriptor; 2] = [
    KindDescriptor::new(
        "ARRAYFLOAT32",
        KindFamily::CompoundReal,
        32,
        "float",
        "CompoundFloatDataset",
    ),
    KindDescriptor::new(
        "ARRAYFLOAT64",
        KindFamily::CompoundReal,
        64,
        "double",
        "CompoundDoubleDataset",
    ),
];

static COMPLEX_KINDS: [KindDescriptor; 2] = [
    KindDescriptor::new(
        "COMPLEX64",
        KindFamily::Complex,
        64,
        "float",
        "ComplexFloatDataset",
    ),
    KindDescriptor::new(
        "COMPLEX128",
        KindFamily::Complex,
        128,
        "double",
        "ComplexDoubleDataset",
    ),
];
