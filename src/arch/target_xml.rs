macro_rules! core_feature {
    () => {
        concat!(
            r#"<feature name="org.gnu.gdb.m68k.core">"#,
            r#"<reg name="d0" bitsize="32"/>"#,
            r#"<reg name="d1" bitsize="32"/>"#,
            r#"<reg name="d2" bitsize="32"/>"#,
            r#"<reg name="d3" bitsize="32"/>"#,
            r#"<reg name="d4" bitsize="32"/>"#,
            r#"<reg name="d5" bitsize="32"/>"#,
            r#"<reg name="d6" bitsize="32"/>"#,
            r#"<reg name="d7" bitsize="32"/>"#,
            r#"<reg name="a0" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="a1" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="a2" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="a3" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="a4" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="a5" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="fp" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="sp" bitsize="32" type="data_ptr"/>"#,
            r#"<reg name="ps" bitsize="32"/>"#,
            r#"<reg name="pc" bitsize="32" type="code_ptr"/>"#,
            r#"</feature>"#,
        )
    };
}

macro_rules! fp_feature {
    () => {
        concat!(
            r#"<feature name="org.gnu.gdb.coldfire.fp">"#,
            r#"<reg name="fp0" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp1" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp2" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp3" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp4" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp5" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp6" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fp7" bitsize="96" type="float" group="float"/>"#,
            r#"<reg name="fpcontrol" bitsize="32" group="float"/>"#,
            r#"<reg name="fpstatus" bitsize="32" group="float"/>"#,
            r#"<reg name="fpiaddr" bitsize="32" type="code_ptr" group="float"/>"#,
            r#"</feature>"#,
        )
    };
}

macro_rules! target_header {
    () => {
        concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<!DOCTYPE target SYSTEM "gdb-target.dtd">"#,
            r#"<target version="1.0">"#,
            r#"<architecture>m68k</architecture>"#,
        )
    };
}

const CORE_XML: &str = concat!(target_header!(), core_feature!(), "</target>");
const FPU_XML: &str = concat!(
    target_header!(),
    core_feature!(),
    fp_feature!(),
    "</target>"
);

/// The `target.xml` document describing the register file the server
/// reports.
pub fn target_xml(has_fpu: bool) -> &'static str {
    if has_fpu {
        FPU_XML
    } else {
        CORE_XML
    }
}
