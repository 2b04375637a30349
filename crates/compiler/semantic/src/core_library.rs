//! The embedded `System` declarations every compilation references unless
//! [`CompilationOptions::include_core_library`](crate::CompilationOptions) is off.

use once_cell::sync::Lazy;
use prism_compiler_parser::{parse_text, Parse};

pub const CORE_LIBRARY_PATH: &str = "<core>";

pub const CORE_LIBRARY_SOURCE: &str = r#"
namespace System
{
    public class Object { }
    public abstract class ValueType { }
    public abstract class Enum : ValueType { }
    public abstract class Array { }
    public sealed class String { }
    public abstract class Type { }
    public abstract class Delegate { }
    public abstract class MulticastDelegate : Delegate { }
    public abstract class Attribute { }

    public struct Void { }
    public struct Boolean { }
    public struct Char { }
    public struct SByte { }
    public struct Byte { }
    public struct Int16 { }
    public struct UInt16 { }
    public struct Int32 { }
    public struct UInt32 { }
    public struct Int64 { }
    public struct UInt64 { }
    public struct Single { }
    public struct Double { }
    public struct Decimal { }

    public struct Nullable<T> where T : struct
    {
        public T Value { get; }
        public bool HasValue { get; }
    }

    public interface IDisposable
    {
        void Dispose();
    }

    public interface IEquatable<T>
    {
        bool Equals(T other);
    }

    public enum AttributeTargets
    {
        Assembly = 1,
        Module = 2,
        Class = 4,
        Struct = 8,
        Enum = 16,
        Constructor = 32,
        Method = 64,
        Property = 128,
        Field = 256,
        Event = 512,
        Interface = 1024,
        Parameter = 2048,
        Delegate = 4096,
        ReturnValue = 8192,
        GenericParameter = 16384,
        All = 32767,
    }

    public sealed class AttributeUsageAttribute : Attribute
    {
        public AttributeUsageAttribute(AttributeTargets validOn) { }
        public AttributeTargets ValidOn { get; }
        public bool AllowMultiple { get; set; }
        public bool Inherited { get; set; }
    }

    public sealed class ObsoleteAttribute : Attribute
    {
        public ObsoleteAttribute() { }
        public ObsoleteAttribute(string message) { }
        public ObsoleteAttribute(string message, bool error) { }
        public string Message { get; }
        public bool IsError { get; }
    }
}

namespace System.Collections.Generic
{
    public interface IEnumerable<T> { }
    public interface IReadOnlyList<T> : IEnumerable<T>
    {
        int Count { get; }
    }
    public class List<T> : IReadOnlyList<T>
    {
        public int Count { get; }
    }
}

namespace System.Threading.Tasks
{
    public class Task { }
    public class Task<TResult> : Task
    {
        public TResult Result { get; }
    }
    public struct ValueTask { }
    public struct ValueTask<TResult> { }
}
"#;

/// The core library is parsed once per process and shared by every compilation.
pub(crate) static CORE_LIBRARY: Lazy<Parse> = Lazy::new(|| parse_text(CORE_LIBRARY_SOURCE));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_library_parses_cleanly() {
        assert!(
            CORE_LIBRARY.diagnostics().is_empty(),
            "{:?}",
            CORE_LIBRARY.diagnostics()
        );
    }
}
